pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "wayfarer::notify", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "wayfarer::notify", "{}", message);
    }
}
