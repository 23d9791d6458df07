/// Oracle opinion about a name or address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Sink,
    Allow,
}

impl Verdict {
    pub fn from_sink_flag(sink: bool) -> Self {
        if sink {
            Self::Sink
        } else {
            Self::Allow
        }
    }

    pub fn is_sink(&self) -> bool {
        matches!(self, Self::Sink)
    }
}

impl From<bool> for Verdict {
    fn from(sink: bool) -> Self {
        Self::from_sink_flag(sink)
    }
}

impl From<Verdict> for bool {
    fn from(verdict: Verdict) -> Self {
        verdict.is_sink()
    }
}
