//! Integration tests for the fontmat surface

use fontmat::prelude::*;

#[test]
fn scale_rotate_duplicate_then_serialize() {
    // Build up a transform: scale first, then a quarter turn.
    let mut m = Matrix::IDENTITY;
    m.scale(2.0, 3.0);
    m.rotate(0.0, 1.0);
    assert_eq!(m, Matrix::new(0.0, -3.0, 2.0, 0.0));

    // A heap copy stays field-equal to the original.
    let empty = MatrixStore::with_capacity(0);
    let heap = MatrixHandle::owned(m);
    let copy = heap.duplicate(&empty).unwrap();
    assert!(heap.same_matrix(&copy, &empty));

    // One prepare, one serialize, a store of length one.
    let mut session = SerializeSession::new();
    session.begin_count().unwrap();
    session.prepare(&m).unwrap();

    let mut store = MatrixStore::with_capacity(session.counted());
    session.begin_assign().unwrap();
    let slot = session.serialize(&m).unwrap();
    if let MatrixHandle::Indexed(pos) = &slot {
        store.place(*pos, &m).unwrap();
    }
    session.finish().unwrap();

    assert!(matches!(slot, MatrixHandle::Indexed(0)));
    assert_eq!(
        slot.resolve(&store),
        Some(&Matrix::new(0.0, -3.0, 2.0, 0.0))
    );
}

#[test]
fn session_phases_are_visible_through_the_prelude() {
    let mut session = SerializeSession::new();
    assert_eq!(session.phase(), Phase::Idle);

    session.begin_count().unwrap();
    assert_eq!(session.phase(), Phase::Counting);

    session.reset();
    assert_eq!(session.phase(), Phase::Idle);
}

#[test]
fn protocol_errors_unify_under_the_crate_error() {
    let mut session = SerializeSession::new();
    let err: Error = session.finish().unwrap_err().into();
    assert!(matches!(
        err,
        Error::Serialize(SerializeError::PhaseMismatch { .. })
    ));
}

#[test]
fn shared_store_serves_concurrent_readers() {
    use std::sync::Arc;
    use std::thread;

    let mats: Vec<Matrix> = (0..8)
        .map(|i| Matrix::new(1.0 + i as f64, 0.0, 0.0, 1.0))
        .collect();
    let (store, handles) = MatrixStore::compact(&mats).unwrap();

    let shared: SharedMatrixStore = Arc::new(parking_lot::RwLock::new(store));
    let handles = Arc::new(handles);

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            let handles = Arc::clone(&handles);
            let mats = mats.clone();
            thread::spawn(move || {
                let guard = shared.read();
                for (handle, expected) in handles.iter().zip(&mats) {
                    assert_eq!(handle.resolve(&guard), Some(expected));
                }
            })
        })
        .collect();

    for reader in readers {
        reader.join().unwrap();
    }
}
