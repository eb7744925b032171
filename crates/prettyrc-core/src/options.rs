//! Formatting options
//!
//! [`FormatOptions`] is a partial record: every field is optional so the same
//! type describes the base configuration and the fragment carried by an
//! override. Keys the model does not know are kept in [`FormatOptions::extra`]
//! so a load/save cycle never drops data.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declares a closed-domain option value with its wire spelling.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted spelling, in declaration order
            pub const VALUES: &'static [&'static str] = &[$($text),+];

            /// The spelling used in configuration files
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!(
                        "`{}` is not one of: {}",
                        other,
                        Self::VALUES.join(", ")
                    )),
                }
            }
        }
    };
}

choice_enum! {
    /// Trailing comma policy
    TrailingComma {
        /// Wherever the target syntax allows them
        All => "all",
        /// Where valid in ES5 (objects, arrays)
        Es5 => "es5",
        /// Never
        None => "none",
    }
}

choice_enum! {
    /// Parentheses around a sole arrow function parameter
    ArrowParens {
        Always => "always",
        Avoid => "avoid",
    }
}

choice_enum! {
    /// Wrapping policy for markdown prose
    ProseWrap {
        Always => "always",
        Never => "never",
        Preserve => "preserve",
    }
}

choice_enum! {
    /// Whitespace handling in HTML-like markup
    HtmlWhitespaceSensitivity {
        /// Follow the CSS `display` property
        Css => "css",
        /// All whitespace is significant
        Strict => "strict",
        /// All whitespace is insignificant
        Ignore => "ignore",
    }
}

choice_enum! {
    /// Line ending normalization
    EndOfLine {
        Lf => "lf",
        Crlf => "crlf",
        Cr => "cr",
        /// Keep whatever the file already uses
        Auto => "auto",
    }
}

choice_enum! {
    /// Whether code embedded in another language is reformatted
    EmbeddedLanguageFormatting {
        Auto => "auto",
        Off => "off",
    }
}

choice_enum! {
    /// When object property names get quoted
    QuoteProps {
        AsNeeded => "as-needed",
        Consistent => "consistent",
        Preserve => "preserve",
    }
}

choice_enum! {
    /// Object literal wrapping
    ObjectWrap {
        Preserve => "preserve",
        Collapse => "collapse",
    }
}

/// A partial set of formatting options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_tabs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semi: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_quote: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsx_single_quote: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_props: Option<QuoteProps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_comma: Option<TrailingComma>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bracket_spacing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_wrap: Option<ObjectWrap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bracket_same_line: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_parens: Option<ArrowParens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prose_wrap: Option<ProseWrap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_whitespace_sensitivity: Option<HtmlWhitespaceSensitivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vue_indent_script_and_style: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_line: Option<EndOfLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedded_language_formatting: Option<EmbeddedLanguageFormatting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_attribute_per_line: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experimental_ternaries: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_pragma: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_pragma: Option<bool>,
    /// Forced parser name, normally only set inside an override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,

    // prettier-plugin-sh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_comments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_next_line: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_case_indent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_redirects: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_padding: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_next_line: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experimental_wasm: Option<bool>,

    // prettier-plugin-organize-imports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organize_imports_skip_destructive_code_actions: Option<bool>,

    /// Keys this model does not recognize, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FormatOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// The formatter's documented defaults for every core option
    pub fn defaults() -> Self {
        Self {
            print_width: Some(80),
            tab_width: Some(2),
            use_tabs: Some(false),
            semi: Some(true),
            single_quote: Some(false),
            jsx_single_quote: Some(false),
            quote_props: Some(QuoteProps::AsNeeded),
            trailing_comma: Some(TrailingComma::All),
            bracket_spacing: Some(true),
            object_wrap: Some(ObjectWrap::Preserve),
            bracket_same_line: Some(false),
            arrow_parens: Some(ArrowParens::Always),
            prose_wrap: Some(ProseWrap::Preserve),
            html_whitespace_sensitivity: Some(HtmlWhitespaceSensitivity::Css),
            vue_indent_script_and_style: Some(false),
            end_of_line: Some(EndOfLine::Lf),
            embedded_language_formatting: Some(EmbeddedLanguageFormatting::Auto),
            single_attribute_per_line: Some(false),
            experimental_ternaries: Some(false),
            require_pragma: Some(false),
            insert_pragma: Some(false),
            ..Self::default()
        }
    }

    /// Layer `other` on top of `self`: every key set in `other` wins
    pub fn merge_from(&mut self, other: &FormatOptions) {
        macro_rules! overlay {
            ($($field:ident),+ $(,)?) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field.clone();
                    }
                )+
            };
        }

        overlay!(
            print_width,
            tab_width,
            use_tabs,
            semi,
            single_quote,
            jsx_single_quote,
            quote_props,
            trailing_comma,
            bracket_spacing,
            object_wrap,
            bracket_same_line,
            arrow_parens,
            prose_wrap,
            html_whitespace_sensitivity,
            vue_indent_script_and_style,
            end_of_line,
            embedded_language_formatting,
            single_attribute_per_line,
            experimental_ternaries,
            require_pragma,
            insert_pragma,
            parser,
            keep_comments,
            binary_next_line,
            switch_case_indent,
            space_redirects,
            keep_padding,
            minify,
            function_next_line,
            experimental_wasm,
            organize_imports_skip_destructive_code_actions,
        );

        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// Return a copy of `self` with `other` layered on top
    pub fn merged(&self, other: &FormatOptions) -> FormatOptions {
        let mut out = self.clone();
        out.merge_from(other);
        out
    }

    /// Check whether no option is set
    pub fn is_empty(&self) -> bool {
        *self == FormatOptions::default()
    }

    /// Names of the keys that are set, as they appear in configuration files
    pub fn keys(&self) -> Vec<String> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}
