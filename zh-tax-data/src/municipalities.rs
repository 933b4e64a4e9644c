//! Municipal Steuerfuss directory for the canton of Zürich.
//!
//! Steuerfüsse are integer percentages applied to the einfache Staatssteuer.
//! The directory carries the municipalities the questionnaire offers; an
//! unknown municipality is simply absent, the caller supplies the multiplier
//! directly in that case.

/// A municipality and its Steuerfuss for the carried tax year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Municipality {
    pub name: &'static str,
    pub multiplier: u32,
}

/// Steuerfüsse 2024.
pub const MUNICIPALITIES: &[Municipality] = &[
    Municipality { name: "Zürich", multiplier: 119 },
    Municipality { name: "Winterthur", multiplier: 122 },
    Municipality { name: "Uster", multiplier: 108 },
    Municipality { name: "Dübendorf", multiplier: 96 },
    Municipality { name: "Dietikon", multiplier: 118 },
    Municipality { name: "Wetzikon", multiplier: 105 },
    Municipality { name: "Horgen", multiplier: 93 },
    Municipality { name: "Bülach", multiplier: 104 },
    Municipality { name: "Thalwil", multiplier: 82 },
    Municipality { name: "Zollikon", multiplier: 77 },
    Municipality { name: "Küsnacht", multiplier: 77 },
    Municipality { name: "Meilen", multiplier: 80 },
    Municipality { name: "Zumikon", multiplier: 73 },
    Municipality { name: "Kilchberg", multiplier: 72 },
];

/// Looks up a municipality's Steuerfuss by name.
pub fn municipal_multiplier(name: &str) -> Option<u32> {
    MUNICIPALITIES
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(name))
        .map(|m| m.multiplier)
}
