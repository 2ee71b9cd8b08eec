//! Countries offered for selection.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub name: &'static str,
    /// ISO 3166-1 alpha-2 code.
    pub code: &'static str,
}

const DEFAULT_COUNTRIES: [Country; 10] = [
    Country { name: "India", code: "IN" },
    Country { name: "United States", code: "US" },
    Country { name: "China", code: "CN" },
    Country { name: "Japan", code: "JP" },
    Country { name: "Germany", code: "DE" },
    Country { name: "United Kingdom", code: "GB" },
    Country { name: "France", code: "FR" },
    Country { name: "Brazil", code: "BR" },
    Country { name: "South Africa", code: "ZA" },
    Country { name: "Australia", code: "AU" },
];

#[derive(Debug, Clone)]
pub struct CountryCatalog {
    countries: Vec<Country>,
}

impl Default for CountryCatalog {
    fn default() -> Self {
        Self {
            countries: DEFAULT_COUNTRIES.to_vec(),
        }
    }
}

impl CountryCatalog {
    /// Exact, case-sensitive lookup by display name.
    pub fn lookup(&self, name: &str) -> Option<Country> {
        self.countries.iter().copied().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }
}

/// Capitalise the first letter of every word and lowercase the rest.
///
/// A word starts after any non-alphabetic char, so `"guinea-bissau"` becomes
/// `"Guinea-Bissau"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_alpha = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
