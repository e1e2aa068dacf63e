use super::*;
use crate::foundation::core::Wallet;

fn seed() -> Seed {
    let w = Wallet::parse("0x3333333333333333333333333333333333333333").unwrap();
    Seed::from_parts(&w, 1, "00000000")
}

#[test]
fn rows_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db").join("renders.redb");
    {
        let mut store = RedbStore::open(&path).unwrap();
        store
            .insert(
                "studio",
                dir.path(),
                "a.png",
                &seed(),
                1200,
                &RenderMetadata::new("Cream", 4),
            )
            .unwrap();
    }

    let store = RedbStore::open(&path).unwrap();
    let rows = store.rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].host, "studio");
    assert_eq!(rows[0].filename, "a.png");
    assert_eq!(rows[0].seed, seed().to_string());
    assert_eq!(rows[0].render_width, 1200);
    assert_eq!(rows[0].metadata.num_points, 4);
}

#[test]
fn rows_are_keyed_by_host_dir_and_filename() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RedbStore::open(&dir.path().join("r.redb")).unwrap();
    let meta = RenderMetadata::new("Ink", 1);
    store.insert("a", dir.path(), "x.png", &seed(), 100, &meta).unwrap();
    store.insert("b", dir.path(), "x.png", &seed(), 100, &meta).unwrap();
    store.insert("a", dir.path(), "x.png", &seed(), 100, &meta).unwrap();
    assert_eq!(store.rows().unwrap().len(), 2);
}
