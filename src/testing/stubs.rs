use crate::ui::drivers::PromptDriver;
use anyhow::{Result, anyhow};
use std::cell::RefCell;
use std::collections::VecDeque;

/// [`PromptDriver`] that replays canned answers, one queue per answer type.
///
/// Exhausting a queue is an error so a test that under-scripts a flow fails
/// loudly instead of hanging on a default.
#[derive(Default)]
pub struct ScriptedDriver {
    bools: RefCell<VecDeque<bool>>,
    strings: RefCell<VecDeque<String>>,
    u64s: RefCell<VecDeque<u64>>,
    f64s: RefCell<VecDeque<f64>>,
    choices: RefCell<VecDeque<usize>>,
}

impl ScriptedDriver {
    pub fn new() -> ScriptedDriver {
        ScriptedDriver::default()
    }

    pub fn with_bools(self, answers: &[bool]) -> Self {
        self.bools.borrow_mut().extend(answers.iter().copied());
        self
    }

    pub fn with_strings(self, answers: &[&str]) -> Self {
        self.strings
            .borrow_mut()
            .extend(answers.iter().map(|s| s.to_string()));
        self
    }

    pub fn with_u64s(self, answers: &[u64]) -> Self {
        self.u64s.borrow_mut().extend(answers.iter().copied());
        self
    }

    pub fn with_f64s(self, answers: &[f64]) -> Self {
        self.f64s.borrow_mut().extend(answers.iter().copied());
        self
    }

    pub fn with_choices(self, answers: &[usize]) -> Self {
        self.choices.borrow_mut().extend(answers.iter().copied());
        self
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_bool(&self, title: &str, _help: &str, _default: bool) -> Result<bool> {
        self.bools
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted bool answer for `{title}`"))
    }

    fn ask_string(&self, title: &str, _help: &str, _default: &str) -> Result<String> {
        self.strings
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted string answer for `{title}`"))
    }

    fn ask_u64(&self, title: &str, _help: &str, _default: u64) -> Result<u64> {
        self.u64s
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted u64 answer for `{title}`"))
    }

    fn ask_f64(&self, title: &str, _help: &str, _default: f64) -> Result<f64> {
        self.f64s
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted f64 answer for `{title}`"))
    }

    fn ask_choice(&self, title: &str, options: &[String]) -> Result<usize> {
        let index = self
            .choices
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted choice answer for `{title}`"))?;
        if index >= options.len() {
            return Err(anyhow!(
                "scripted choice {index} out of range for `{title}` ({} options)",
                options.len()
            ));
        }
        Ok(index)
    }
}
