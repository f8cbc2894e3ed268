use rand::RngExt;

pub const QUOTES: &[&str] = &[
    "\u{201c}It's not that we have a short time to live, but that we waste a lot of it.\u{201d} - Seneca",
    "\u{201c}Live as if you were to die tomorrow. Learn as if you were to live forever.\u{201d} - Gandhi",
    "\u{201c}You have 4,680 weeks. What will you do with them?\u{201d}",
    "\u{201c}You only live once, but if you do it right, once is enough.\u{201d} - Mae West",
    "\u{201c}Don't count the days, make the days count.\u{201d} - Muhammad Ali",
];

/// Picks one quote uniformly at random.
pub fn random_quote() -> &'static str {
    let mut rng = rand::rng();
    QUOTES[rng.random_range(0..QUOTES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_quote_comes_from_the_list() {
        for _ in 0..20 {
            assert!(QUOTES.contains(&random_quote()));
        }
    }
}
