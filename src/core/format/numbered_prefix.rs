/// Hierarchical item numbers for enumerated lists: "1", "1.2", "1.2.3".

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedPrefix {
    prefix: String,
}

impl Default for NumberedPrefix {
    fn default() -> Self {
        Self {
            prefix: "0".to_string(),
        }
    }
}

impl NumberedPrefix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Bump the innermost counter.
    pub fn increment(&mut self) {
        let (head, last) = match self.prefix.rsplit_once('.') {
            Some((head, last)) => (Some(head), last),
            None => (None, self.prefix.as_str()),
        };
        let next = last.parse::<u32>().unwrap_or(0) + 1;
        self.prefix = match head {
            Some(head) => format!("{head}.{next}"),
            None => next.to_string(),
        };
    }

    /// Open a nested level numbered from 1.
    pub fn up_a_level(&mut self) {
        if self.prefix == "0" {
            self.prefix = "1".to_string();
        } else {
            self.prefix.push_str(".1");
        }
    }

    /// Close the innermost level; closing the top level resets to "0".
    pub fn down_a_level(&mut self) {
        match self.prefix.rfind('.') {
            Some(dot) => self.prefix.truncate(dot),
            None => self.prefix = "0".to_string(),
        }
    }
}
