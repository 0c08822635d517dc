use chrono::{DateTime, Utc};

/// Timestamp stamped on every dispatch payload. Tests may pin it per thread.
pub fn utc_now() -> DateTime<Utc> {
    #[cfg(test)]
    if let Some(pinned) = test::pinned() {
        return pinned;
    }
    Utc::now()
}

#[cfg(test)]
pub mod test {
    use std::cell::Cell;

    use chrono::{DateTime, Utc};

    thread_local! {
        static PINNED: Cell<Option<DateTime<Utc>>> = const { Cell::new(None) };
    }

    pub fn pinned() -> Option<DateTime<Utc>> {
        PINNED.get()
    }

    pub fn pin_clock(at: DateTime<Utc>) {
        PINNED.set(Some(at));
    }

    pub fn unpin_clock() {
        PINNED.set(None);
    }

    #[test]
    fn pinned_clock_overrides_the_wall_clock() -> anyhow::Result<()> {
        let shift_close: DateTime<Utc> = "2025-11-13 22:00:00 UTC".parse()?;
        pin_clock(shift_close);
        assert_eq!(shift_close, super::utc_now());
        unpin_clock();
        assert!(super::utc_now() > shift_close);
        Ok(())
    }
}
