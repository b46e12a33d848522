//! Parse options and syntax extensions.

/// Default maximum directive nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = i16::MAX as usize;

/// Opt-in syntax extensions.
///
/// All extensions default to off; the base language is exactly the core
/// Confetti grammar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extensions {
    /// Recognize `// ...` and `/* ... */` comments in addition to `# ...`.
    pub c_style_comments: bool,
    /// Treat a parenthesized group `( ... )` as a single argument.
    pub expression_arguments: bool,
    /// Literal strings promoted to stand-alone arguments wherever they
    /// appear. Supplied as raw bytes so validation can reject malformed
    /// UTF-8; each string must otherwise contain only argument
    /// characters, a NUL byte ends it early, and empty strings are
    /// ignored.
    pub punctuator_arguments: Vec<Vec<u8>>,
}

/// Caller-supplied parse configuration.
///
/// # Examples
///
/// ```
/// use confetti_util::{Extensions, Options};
///
/// let options = Options {
///     allow_bidi: true,
///     extensions: Extensions {
///         c_style_comments: true,
///         ..Extensions::default()
///     },
///     ..Options::default()
/// };
/// assert_eq!(options.max_depth, confetti_util::DEFAULT_MAX_DEPTH);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Maximum directive nesting depth. Zero selects the default.
    pub max_depth: usize,
    /// Accept Unicode bidirectional formatting characters. When false,
    /// any such character in the source is a syntax error, even inside
    /// comments and quoted arguments.
    pub allow_bidi: bool,
    /// Opt-in syntax extensions.
    pub extensions: Extensions,
}

impl Options {
    /// Returns the nesting depth limit, substituting the default for zero.
    #[inline]
    pub fn effective_max_depth(&self) -> usize {
        if self.max_depth == 0 {
            DEFAULT_MAX_DEPTH
        } else {
            self.max_depth
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_bidi: false,
            extensions: Extensions::default(),
        }
    }
}
