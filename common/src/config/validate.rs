pub trait Validate {
    /// Human-readable reason when the value is unusable.
    fn validate(&self) -> Result<(), String>;
}
