/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based index of the question on screen.
    pub current: usize,
    pub total: usize,
    pub answered: usize,
    pub score: u32,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Width of the progress bar: questions already left behind, in percent.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let done = if self.is_complete {
            self.total
        } else {
            self.current.saturating_sub(1)
        };
        u32::try_from(done * 100 / self.total).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(current: usize, is_complete: bool) -> SessionProgress {
        SessionProgress {
            current,
            total: 10,
            answered: current,
            score: 0,
            is_complete,
        }
    }

    #[test]
    fn percent_counts_questions_behind() {
        assert_eq!(progress(1, false).percent(), 0);
        assert_eq!(progress(4, false).percent(), 30);
        assert_eq!(progress(10, false).percent(), 90);
        assert_eq!(progress(10, true).percent(), 100);
    }
}
