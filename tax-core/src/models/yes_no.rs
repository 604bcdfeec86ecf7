/// Two-valued answer held by the registration and startup flag cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    /// Parses a flag token. Surrounding whitespace and letter case are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("yes") {
            Some(Self::Yes)
        } else if token.eq_ignore_ascii_case("no") {
            Some(Self::No)
        } else {
            None
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

impl std::fmt::Display for YesNo {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
