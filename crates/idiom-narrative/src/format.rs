//! Rendering narratives as plain text, HTML or Markdown.
//!
//! Rendering never fails. A format selector other than `plain` or `html`
//! (including the empty string) renders Markdown.
//!
//! Field text is written verbatim in every layout. Narratives quote code
//! (`Result<T, E>`, `a && b`), and the HTML layout keeps that text as is so
//! each field can be found literally in the output.

use std::fmt::{self, Write};

use idiom_core::{Narrative, NarrativeSection};

/// An output layout for a [`Narrative`].
///
/// # Examples
///
/// ```
/// use idiom_narrative::NarrativeFormat;
///
/// assert_eq!(NarrativeFormat::from_selector("plain"), NarrativeFormat::Plain);
/// assert_eq!(NarrativeFormat::from_selector("html"), NarrativeFormat::Html);
/// assert_eq!(NarrativeFormat::from_selector(""), NarrativeFormat::Markdown);
/// assert_eq!(NarrativeFormat::from_selector("yaml"), NarrativeFormat::Markdown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NarrativeFormat {
    /// Paragraphs separated by blank lines; safety and example labeled.
    Plain,
    /// One labeled `<p>` element per section, text unescaped.
    Html,
    /// One bold-labeled paragraph per section.
    #[default]
    Markdown,
}

impl NarrativeFormat {
    /// Maps a format selector to a format. Unknown selectors map to
    /// [`Markdown`](Self::Markdown).
    #[must_use]
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "plain" => Self::Plain,
            "html" => Self::Html,
            _ => Self::Markdown,
        }
    }

    /// Returns the canonical selector for this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Html => "html",
            Self::Markdown => "markdown",
        }
    }

    /// Renders a narrative in this format.
    #[must_use]
    pub fn render(self, narrative: &Narrative) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = match self {
            Self::Plain => render_plain(&mut out, narrative),
            Self::Html => render_html(&mut out, narrative),
            Self::Markdown => render_markdown(&mut out, narrative),
        };
        out
    }
}

impl fmt::Display for NarrativeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders `narrative` for a format selector.
///
/// # Examples
///
/// ```
/// use idiom_core::Narrative;
/// use idiom_narrative::format;
///
/// let narrative = Narrative {
///     celebrate: "Good guard.".to_owned(),
///     minimize: "Option is the same idea.".to_owned(),
///     better: "The compiler remembers.".to_owned(),
///     safety: "No null dereference.".to_owned(),
///     example: "user.map(|u| u.name)".to_owned(),
/// };
///
/// let html = format(&narrative, "html");
/// assert!(html.contains("<p class=\"safety\"><strong>Safety:</strong> No null dereference.</p>"));
/// ```
#[must_use]
pub fn format(narrative: &Narrative, selector: &str) -> String {
    NarrativeFormat::from_selector(selector).render(narrative)
}

fn render_plain(out: &mut String, narrative: &Narrative) -> fmt::Result {
    for (index, (section, text)) in narrative.sections().into_iter().enumerate() {
        if index > 0 {
            out.push_str("\n\n");
        }
        match section {
            NarrativeSection::Safety | NarrativeSection::Example => {
                write!(out, "{}: {text}", section.label())?;
            }
            NarrativeSection::Celebrate | NarrativeSection::Minimize | NarrativeSection::Better => {
                out.push_str(text);
            }
        }
    }
    out.push('\n');
    Ok(())
}

fn render_html(out: &mut String, narrative: &Narrative) -> fmt::Result {
    out.push_str("<div class=\"narrative\">\n");
    for (section, text) in narrative.sections() {
        writeln!(
            out,
            "<p class=\"{}\"><strong>{}:</strong> {}</p>",
            section.key(),
            section.label(),
            text
        )?;
    }
    out.push_str("</div>\n");
    Ok(())
}

fn render_markdown(out: &mut String, narrative: &Narrative) -> fmt::Result {
    for (index, (section, text)) in narrative.sections().into_iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        writeln!(out, "**{}:** {text}", section.label())?;
    }
    Ok(())
}
