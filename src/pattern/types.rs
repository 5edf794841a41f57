/// Body-shape grammar. Each route declares one `Pattern` for its JSON body;
/// the verifier walks the pattern against the parsed value before any
/// business logic runs.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A string, optionally restricted to a fixed set of values or a
    /// minimum length.
    String {
        options: Option<Vec<&'static str>>,
        minimum_length: Option<usize>,
    },
    Boolean,
    Number,
    /// Any JSON scalar (string, number or boolean).
    Scalar,
    /// An array whose elements all match the inner pattern.
    List(Box<Pattern>),
    /// An object with a fixed set of named entries. Strict maps reject
    /// unknown keys.
    Map {
        entries: Vec<(&'static str, Pattern)>,
        strict: bool,
    },
    /// An object with arbitrary keys whose values all match the inner
    /// pattern.
    Record(Box<Pattern>),
    /// Matches when any one alternative matches.
    OneOf(Vec<Pattern>),
}

#[derive(Debug, Clone)]
pub struct Pattern {
    pub shape: Shape,
    pub optional: bool,
}

impl Pattern {
    fn wrap(shape: Shape) -> Self {
        Pattern { shape, optional: false }
    }

    pub fn string() -> Self {
        Self::wrap(Shape::String { options: None, minimum_length: None })
    }

    pub fn string_enum(options: &[&'static str]) -> Self {
        Self::wrap(Shape::String {
            options: Some(options.to_vec()),
            minimum_length: None,
        })
    }

    pub fn minimum_length(mut self, length: usize) -> Self {
        if let Shape::String { minimum_length, .. } = &mut self.shape {
            *minimum_length = Some(length);
        }
        self
    }

    pub fn boolean() -> Self {
        Self::wrap(Shape::Boolean)
    }

    pub fn number() -> Self {
        Self::wrap(Shape::Number)
    }

    pub fn scalar() -> Self {
        Self::wrap(Shape::Scalar)
    }

    pub fn list(element: Pattern) -> Self {
        Self::wrap(Shape::List(Box::new(element)))
    }

    pub fn strict_map(entries: Vec<(&'static str, Pattern)>) -> Self {
        Self::wrap(Shape::Map { entries, strict: true })
    }

    pub fn map(entries: Vec<(&'static str, Pattern)>) -> Self {
        Self::wrap(Shape::Map { entries, strict: false })
    }

    pub fn record(value: Pattern) -> Self {
        Self::wrap(Shape::Record(Box::new(value)))
    }

    pub fn one_of(variants: Vec<Pattern>) -> Self {
        Self::wrap(Shape::OneOf(variants))
    }

    /// The shared shape for `userInfos`/`ownerInfos` fields: either an
    /// info-line string or a record of scalars.
    pub fn info() -> Self {
        Self::one_of(vec![Pattern::string(), Pattern::record(Pattern::scalar())])
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}
