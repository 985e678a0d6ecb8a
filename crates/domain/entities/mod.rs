pub mod pricing_plans;
pub mod programs;
pub mod testimonials;

/// A record owned by one resource store. The store assigns the id when the
/// record is appended.
pub trait ContentRecord {
    fn id(&self) -> &str;
    fn assign_id(&mut self, id: String);
}
