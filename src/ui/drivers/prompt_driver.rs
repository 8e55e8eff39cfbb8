use anyhow::Result;

/// Abstraction over the interactive prompt backend so analysis flows can be
/// driven by scripted answers in tests.
pub trait PromptDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool>;
    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;
    fn ask_u64(&self, title: &str, help: &str, default: u64) -> Result<u64>;
    fn ask_f64(&self, title: &str, help: &str, default: f64) -> Result<f64>;

    /// Picks one of `options`, returning its index.
    fn ask_choice(&self, title: &str, options: &[String]) -> Result<usize>;
}
