/// Loads the source value for a key on a cache miss.
///
/// Called on a blocking thread, so implementations may do synchronous I/O.
/// Any plain closure `Fn(&str) -> anyhow::Result<Vec<u8>>` is a `Getter`.
pub trait Getter: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

impl<F> Getter for F
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn get(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        self(key)
    }
}
