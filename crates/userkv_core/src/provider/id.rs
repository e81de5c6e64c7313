use uuid::Uuid;

/// Source of fresh unique string identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Generates random UUID v4 identifiers in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_id(&self) -> String {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, UuidV4Generator};
    use uuid::Uuid;

    #[test]
    fn uuid_generator_yields_distinct_parseable_ids() {
        let first = UuidV4Generator.next_id();
        let second = UuidV4Generator.next_id();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }

    #[test]
    fn closure_acts_as_generator() {
        let ids = || "usr-fixed".to_string();
        assert_eq!(ids.next_id(), "usr-fixed");
    }
}
