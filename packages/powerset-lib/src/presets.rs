use std::{fmt::Display, str::FromStr};

use crate::parse::FormInput;

/// Ready made automata to try the construction on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Words over `a,b` containing `ab`, without epsilon transitions.
    ContainsAb,
    /// `(a|b)*` built with epsilon transitions.
    EpsilonLoop,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::ContainsAb, Preset::EpsilonLoop];

    pub fn form(&self) -> FormInput {
        match self {
            Preset::ContainsAb => FormInput {
                states: "q0,q1,q2,q3".into(),
                alphabet: "a,b".into(),
                transitions: [
                    "q0,a=q0,q1",
                    "q0,b=q0",
                    "q1,a=q2",
                    "q1,b=q0",
                    "q2,a=q2",
                    "q2,b=q3",
                    "q3,a=q2",
                    "q3,b=q3",
                ]
                .join("\n"),
                start: "q0".into(),
                accepting: "q3".into(),
            },
            Preset::EpsilonLoop => FormInput {
                states: "q0,q1,q2,q3".into(),
                alphabet: "a,b".into(),
                transitions: [
                    "q0,e=q1",
                    "q1,a=q1,q2",
                    "q1,b=q1,q3",
                    "q2,a=q2",
                    "q2,b=q2",
                    "q3,a=q3",
                    "q3,b=q3",
                    "q2,e=q0",
                    "q3,e=q0",
                ]
                .join("\n"),
                start: "q0".into(),
                accepting: "q0,q1".into(),
            },
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contains-ab" | "no-epsilon" => Ok(Preset::ContainsAb),
            "epsilon-loop" | "with-epsilon" => Ok(Preset::EpsilonLoop),
            _ => Err(format!("Invalid preset: {}", s)),
        }
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preset::ContainsAb => write!(f, "contains-ab"),
            Preset::EpsilonLoop => write!(f, "epsilon-loop"),
        }
    }
}

#[test]
fn test_presets_parse_cleanly() {
    for preset in Preset::ALL {
        let parsed = preset.form().parse();
        assert!(parsed.skipped.is_empty(), "{} has malformed lines", preset);
        assert_eq!(preset.to_string().parse::<Preset>(), Ok(preset));
    }
}
