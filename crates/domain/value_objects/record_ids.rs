use chrono::{DateTime, Utc};

/// Issues record ids from the creation time in milliseconds.
///
/// Must be used under the owning store's write lock. Ids never repeat: a
/// candidate is bumped past the last issued id and past any id already taken.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    last_issued: i64,
}

impl TimestampIdGenerator {
    pub fn next<F>(&mut self, now: DateTime<Utc>, is_taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        let mut candidate = now.timestamp_millis().max(self.last_issued + 1);
        while is_taken(&candidate.to_string()) {
            candidate += 1;
        }

        self.last_issued = candidate;
        candidate.to_string()
    }
}
