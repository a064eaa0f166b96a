//! Count first, place second
//!
//! A persisted cache wants every matrix in one contiguous array, and
//! the array must be sized before anything moves into it. The session
//! runs the classic two-pass compaction: walk the working set once to
//! count, let the store owner allocate exactly that many slots, then
//! walk again to hand out positions.
//!
//! The session is a small state machine, `Idle -> Counting ->
//! Assigning -> Idle`. Calls made out of order are rejected instead of
//! silently corrupting the counters, and one session drives exactly
//! one cycle at a time; independent cycles get independent sessions.

use crate::error::SerializeError;
use crate::handle::MatrixHandle;
use crate::matrix::Matrix;

/// Which leg of the cycle a session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Counting,
    Assigning,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Idle => "idle",
            Phase::Counting => "counting",
            Phase::Assigning => "assigning",
        })
    }
}

/// Two-pass serialization state for one cache cycle
///
/// Tracks the target count accumulated by the counting pass and the
/// cursor advanced by the assignment pass. Single-threaded by
/// contract: a cache build holds the session exclusively.
#[derive(Debug)]
pub struct SerializeSession {
    phase: Phase,
    counted: usize,
    cursor: usize,
}

impl SerializeSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            counted: 0,
            cursor: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Matrices counted so far; the store must be sized to exactly this
    pub fn counted(&self) -> usize {
        self.counted
    }

    /// Positions handed out so far
    pub fn assigned(&self) -> usize {
        self.cursor
    }

    /// Open the counting pass
    pub fn begin_count(&mut self) -> Result<(), SerializeError> {
        self.expect(Phase::Idle, "begin_count")?;
        self.phase = Phase::Counting;
        log::debug!("serialize session: counting");
        Ok(())
    }

    /// Count one matrix toward the forthcoming store
    ///
    /// Always succeeds during the counting pass; the matrix itself is
    /// untouched, only the target count moves. A future deduplicating
    /// variant could refuse an already-counted value here, which is
    /// why the signature reports more than the phase check needs.
    pub fn prepare(&mut self, matrix: &Matrix) -> Result<(), SerializeError> {
        self.expect(Phase::Counting, "prepare")?;
        log::trace!("counting {matrix:?} as candidate {}", self.counted);
        self.counted += 1;
        Ok(())
    }

    /// Close the counting pass and open the assignment pass
    ///
    /// Between this call and the first `serialize`, the store owner
    /// allocates exactly [`counted`](Self::counted) slots.
    pub fn begin_assign(&mut self) -> Result<(), SerializeError> {
        self.expect(Phase::Counting, "begin_assign")?;
        self.phase = Phase::Assigning;
        self.cursor = 0;
        log::debug!("serialize session: assigning {} slots", self.counted);
        Ok(())
    }

    /// Claim the next store position for a matrix
    ///
    /// Positions come out densely in call order. Asking for more
    /// positions than were counted means some matrix skipped the
    /// counting pass; the caller gets `StorageExhausted` and falls
    /// back to keeping its heap copy. Field values are copied into the
    /// slot by the store owner; this call only allocates the index.
    pub fn serialize(&mut self, matrix: &Matrix) -> Result<MatrixHandle, SerializeError> {
        self.expect(Phase::Assigning, "serialize")?;
        if self.cursor == self.counted {
            return Err(SerializeError::StorageExhausted {
                capacity: self.counted,
            });
        }
        let pos = self.cursor;
        self.cursor += 1;
        log::trace!("assigning {matrix:?} to slot {pos}");
        Ok(MatrixHandle::indexed(pos))
    }

    /// Close the cycle and return to a clean idle state
    ///
    /// Zeroes both counters so the session can run another cycle. A
    /// shortfall between counted and assigned matrices is legal but
    /// logged, since the store ends up larger than its contents.
    pub fn finish(&mut self) -> Result<(), SerializeError> {
        self.expect(Phase::Assigning, "finish")?;
        if self.cursor < self.counted {
            log::warn!(
                "serialize session finished with {} of {} slots assigned",
                self.cursor,
                self.counted
            );
        }
        self.reset();
        Ok(())
    }

    /// Abandon whatever the session was doing and zero the counters
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.counted = 0;
        self.cursor = 0;
    }

    fn expect(&self, wanted: Phase, op: &'static str) -> Result<(), SerializeError> {
        if self.phase == wanted {
            Ok(())
        } else {
            Err(SerializeError::PhaseMismatch {
                op,
                phase: self.phase,
            })
        }
    }
}

impl Default for SerializeSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat(i: usize) -> Matrix {
        Matrix::new(i as f64, 0.0, 0.0, 1.0)
    }

    #[test]
    fn positions_come_out_in_call_order() {
        let mats: Vec<Matrix> = (0..4).map(mat).collect();
        let mut session = SerializeSession::new();

        session.begin_count().unwrap();
        for m in &mats {
            session.prepare(m).unwrap();
        }
        assert_eq!(session.counted(), 4);

        session.begin_assign().unwrap();
        for (i, m) in mats.iter().enumerate() {
            let handle = session.serialize(m).unwrap();
            assert!(matches!(handle, MatrixHandle::Indexed(pos) if pos == i));
        }
        assert_eq!(session.assigned(), 4);

        session.finish().unwrap();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.counted(), 0);
        assert_eq!(session.assigned(), 0);
    }

    #[test]
    fn one_extra_serialize_exhausts_the_storage() {
        let m = mat(1);
        let mut session = SerializeSession::new();

        session.begin_count().unwrap();
        session.prepare(&m).unwrap();
        session.begin_assign().unwrap();

        assert!(session.serialize(&m).is_ok());
        assert_eq!(
            session.serialize(&m),
            Err(SerializeError::StorageExhausted { capacity: 1 })
        );
    }

    #[test]
    fn zero_counted_exhausts_immediately() {
        let mut session = SerializeSession::new();
        session.begin_count().unwrap();
        session.begin_assign().unwrap();

        assert_eq!(
            session.serialize(&mat(0)),
            Err(SerializeError::StorageExhausted { capacity: 0 })
        );
    }

    #[test]
    fn out_of_phase_calls_are_rejected() {
        let m = mat(2);
        let mut session = SerializeSession::new();

        assert_eq!(
            session.prepare(&m),
            Err(SerializeError::PhaseMismatch {
                op: "prepare",
                phase: Phase::Idle
            })
        );
        assert!(session.serialize(&m).is_err());
        assert!(session.begin_assign().is_err());
        assert!(session.finish().is_err());

        session.begin_count().unwrap();
        assert!(session.begin_count().is_err());
        assert!(session.serialize(&m).is_err());

        session.begin_assign().unwrap();
        assert!(session.prepare(&m).is_err());
    }

    #[test]
    fn reset_recovers_from_any_phase() {
        let mut session = SerializeSession::new();
        session.begin_count().unwrap();
        session.prepare(&mat(3)).unwrap();

        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.counted(), 0);

        // A fresh cycle runs cleanly after the abandoned one.
        session.begin_count().unwrap();
        session.prepare(&mat(4)).unwrap();
        session.begin_assign().unwrap();
        assert!(session.serialize(&mat(4)).is_ok());
        session.finish().unwrap();
    }

    #[test]
    fn finish_tolerates_unassigned_slots() {
        let mut session = SerializeSession::new();
        session.begin_count().unwrap();
        session.prepare(&mat(5)).unwrap();
        session.prepare(&mat(6)).unwrap();
        session.begin_assign().unwrap();
        session.serialize(&mat(5)).unwrap();

        // One counted matrix was never assigned; finish still resets.
        session.finish().unwrap();
        assert_eq!(session.phase(), Phase::Idle);
    }
}
