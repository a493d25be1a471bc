use std::time::Duration;

/// Parser options for controlling strictness and source access.
///
/// The extractor is lenient by default: it accepts the page-level quirks that
/// real OCR engines produce. Strict mode turns structural oddities into errors.
///
/// # Example
///
/// ```
/// use alto_oxide::parser_config::ParserOptions;
/// use std::time::Duration;
///
/// // Lenient mode - first Page element wins, later ones are skipped (default)
/// let lenient = ParserOptions::lenient();
///
/// // Strict mode - a second Page element is a format error
/// let strict = ParserOptions::strict();
///
/// // Custom configuration
/// let custom = ParserOptions::lenient()
///     .with_default_language("fre")
///     .with_fetch_timeout(Some(Duration::from_secs(5)));
/// assert_eq!(custom.default_language, "fre");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Fail on structural oddities (true) or recover from them (false)
    ///
    /// Currently the only such oddity is a document with more than one
    /// `Page` element. Missing root or page elements are always fatal.
    pub strict: bool,

    /// Language code used for text blocks without a language attribute
    pub default_language: String,

    /// Timeout for fetching remote documents (`None` = no timeout)
    pub fetch_timeout: Option<Duration>,

    /// User-Agent header sent when fetching remote documents
    pub user_agent: String,
}

/// Language assumed when a text block does not declare one.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Default timeout for remote fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

impl Default for ParserOptions {
    /// Default configuration: lenient mode
    fn default() -> Self {
        Self::lenient()
    }
}

impl ParserOptions {
    /// Strict mode: reject documents with more than one page
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::lenient()
        }
    }

    /// Lenient mode: keep the first page, skip any later ones
    pub fn lenient() -> Self {
        Self {
            strict: false,
            default_language: DEFAULT_LANGUAGE.to_string(),
            fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
            user_agent: concat!("alto_oxide/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the language used for untagged text blocks.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Set the remote fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the User-Agent for remote fetches.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check if a page after the first one may be skipped instead of failing
    pub(crate) fn accepts_extra_pages(&self) -> bool {
        !self.strict
    }
}
