use crate::ui::drivers::PromptDriver;
use anyhow::Result;
use inquire::{Confirm, CustomType, Select, Text};

pub struct InquireDriver;

impl PromptDriver for InquireDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(&self, title: &str, help: &str, default: u64) -> Result<u64> {
        Ok(CustomType::<u64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_f64(&self, title: &str, help: &str, default: f64) -> Result<f64> {
        Ok(CustomType::<f64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_choice(&self, title: &str, options: &[String]) -> Result<usize> {
        Ok(Select::new(title, options.to_vec()).raw_prompt()?.index)
    }
}
