use crate::CoreError;
use std::fmt;
use std::str::FromStr;

/// A `NAME=VALUE` pair taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvAssignment {
    pub name: String,
    pub value: String,
}

impl EnvAssignment {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl FromStr for EnvAssignment {
    type Err = CoreError;

    /// The token must split on `=` into exactly two parts. `A=B=C` is
    /// rejected rather than read as `A` = `B=C`. The value may be empty,
    /// the name may not.
    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = arg.split('=').collect();
        match parts.as_slice() {
            [name, value] if !name.is_empty() => Ok(Self::new(*name, *value)),
            _ => Err(CoreError::ArgumentFormat(arg.to_owned())),
        }
    }
}

impl fmt::Display for EnvAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Parse every argument, keeping command-line order. Stops at the first bad one.
pub fn parse_assignments<I, S>(args: I) -> Result<Vec<EnvAssignment>, CoreError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter().map(|a| a.as_ref().parse()).collect()
}
