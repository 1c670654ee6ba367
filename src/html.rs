//! Escaped HTML fragments.
//!
//! An [`Html`] value is markup that is already safe to emit. Anything else that
//! goes into it is escaped first, so a fragment never gets escaped twice.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Html(String);

impl Html {
    /// Wraps trusted markup without escaping it.
    pub fn raw(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Appends trusted markup.
    pub fn push_raw(&mut self, markup: &str) {
        self.0.push_str(markup);
    }

    /// Appends a value, escaping it unless it is already markup.
    pub fn push(&mut self, value: impl IntoHtml) {
        self.0.push_str(value.into_html().as_str());
    }

    /// Joins escaped items with an escaped delimiter.
    pub fn join<I, T>(items: I, delim: impl IntoHtml) -> Html
    where
        I: IntoIterator<Item = T>,
        T: IntoHtml,
    {
        let delim = delim.into_html();
        let mut out = Html::default();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                out.push_raw(delim.as_str());
            }
            out.push(item);
        }
        out
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Conversion into an escaped fragment
pub trait IntoHtml {
    fn into_html(self) -> Html;
}

impl IntoHtml for Html {
    fn into_html(self) -> Html {
        self
    }
}

impl IntoHtml for &Html {
    fn into_html(self) -> Html {
        self.clone()
    }
}

impl IntoHtml for &str {
    fn into_html(self) -> Html {
        escape(self)
    }
}

impl IntoHtml for String {
    fn into_html(self) -> Html {
        escape(&self)
    }
}

impl IntoHtml for &String {
    fn into_html(self) -> Html {
        escape(self)
    }
}

macro_rules! display_into_html {
    ($($ty:ty),*) => {
        $(impl IntoHtml for $ty {
            fn into_html(self) -> Html {
                escape(&self.to_string())
            }
        })*
    };
}

display_into_html!(i32, i64, u32, u64, usize, f32, f64, char);

/// Escapes `& < > " '` as numeric character references.
pub fn escape(value: &str) -> Html {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' | '<' | '>' | '"' | '\'' => {
                out.push_str("&#");
                out.push_str(&(c as u32).to_string());
                out.push(';');
            }
            _ => out.push(c),
        }
    }
    Html(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href=\"x\">Tom & Jerry's</a>").as_str(),
            "&#60;a href=&#34;x&#34;&#62;Tom &#38; Jerry&#39;s&#60;/a&#62;");
        assert_eq!(escape("plain").as_str(), "plain");
    }

    #[test]
    fn test_markup_is_not_escaped_twice() {
        let fragment = Html::raw("<li>");
        let mut out = Html::default();
        out.push(&fragment);
        out.push("<");
        assert_eq!(out.as_str(), "<li>&#60;");
    }

    #[test]
    fn test_join() {
        let joined = Html::join([Html::raw("<b>1</b>"), Html::raw("<b>2</b>")], ", ");
        assert_eq!(joined.as_str(), "<b>1</b>, <b>2</b>");

        let joined = Html::join(["a&b", "c"], "<br>");
        assert_eq!(joined.as_str(), "a&#38;b&#60;br&#62;c");

        let empty: Vec<&str> = Vec::new();
        assert_eq!(Html::join(empty, ",").as_str(), "");
        assert_eq!(Html::join([1, 2, 3], Html::raw("|")).as_str(), "1|2|3");
    }
}
