use std::fmt;

/// A type as written in source, e.g. `int`, `List<string>`, `byte[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// `Base<A, B>`
    pub fn generic(base: impl Into<String>, args: impl IntoIterator<Item = TypeName>) -> Self {
        let args: Vec<String> = args.into_iter().map(|a| a.0).collect();
        Self(format!("{}<{}>", base.into(), args.join(", ")))
    }

    /// `T[]`
    pub fn array(inner: TypeName) -> Self {
        Self(format!("{}[]", inner.0))
    }

    /// `T?`
    pub fn nullable(inner: TypeName) -> Self {
        Self(format!("{}?", inner.0))
    }

    pub fn int() -> Self {
        Self::new("int")
    }

    pub fn long() -> Self {
        Self::new("long")
    }

    pub fn double() -> Self {
        Self::new("double")
    }

    pub fn bool() -> Self {
        Self::new("bool")
    }

    pub fn string() -> Self {
        Self::new("string")
    }

    pub fn object() -> Self {
        Self::new("object")
    }

    pub fn void() -> Self {
        Self::new("void")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_types() {
        let dict = TypeName::generic("Dictionary", [TypeName::string(), TypeName::int()]);
        assert_eq!(dict.as_str(), "Dictionary<string, int>");
        assert_eq!(TypeName::array(TypeName::new("byte")).as_str(), "byte[]");
        assert_eq!(
            TypeName::nullable(TypeName::generic("List", [TypeName::int()])).as_str(),
            "List<int>?"
        );
    }
}
