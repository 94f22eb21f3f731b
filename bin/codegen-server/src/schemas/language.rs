use strum::{Display, EnumString, VariantNames};

/// Target languages the generator accepts. Names match exactly (case-sensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
pub enum Language {
    Python,
    JavaScript,
    #[strum(serialize = "C++")]
    Cpp,
    TypeScript,
}

impl Language {
    /// `"Python, JavaScript, C++, TypeScript"`, for error messages.
    pub fn supported_list() -> String {
        Self::VARIANTS.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_canonical_names_only() {
        assert_eq!(Language::from_str("C++").unwrap(), Language::Cpp);
        assert_eq!(Language::from_str("TypeScript").unwrap(), Language::TypeScript);
        assert!(Language::from_str("python").is_err());
        assert!(Language::from_str("Cpp").is_err());
        assert!(Language::from_str("Rust").is_err());
    }

    #[test]
    fn display_uses_canonical_names() {
        assert_eq!(Language::Cpp.to_string(), "C++");
        assert_eq!(Language::supported_list(), "Python, JavaScript, C++, TypeScript");
    }
}
