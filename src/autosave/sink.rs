/// Write side of a snapshot's persistence.
#[async_trait::async_trait]
pub trait Sink<T>: Send + Sync + 'static
where
    T: Send + 'static,
{
    async fn store(&self, snapshot: T) -> anyhow::Result<()>;
}
