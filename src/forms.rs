//! Form schemas and the rendering of the two messages sent per inquiry.
//!
//! A schema decides which optional fields are shown, what an absent field
//! renders as, and the wording of the operator notification and the
//! submitter confirmation. One handler serves every schema.

use std::fmt::Write;
use std::str::FromStr;

use crate::models::{Inquiry, OptionalField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormKind {
    /// name / email / message
    #[default]
    Contact,
    /// contact fields plus company / budget / timeline
    Project,
}

impl FromStr for FormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contact" => Ok(FormKind::Contact),
            "project" => Ok(FormKind::Project),
            other => Err(format!("unknown form schema: {other}")),
        }
    }
}

#[derive(Debug)]
struct FieldSpec {
    field: OptionalField,
    label: &'static str,
    placeholder: &'static str,
    /// Repeated back to the submitter in the confirmation
    echo: bool,
}

#[derive(Debug)]
pub struct FormSchema {
    pub kind: FormKind,
    admin_heading: &'static str,
    admin_subject_prefix: &'static str,
    fields: &'static [FieldSpec],
    confirmation_subject: &'static str,
    confirmation_lines: &'static [&'static str],
}

static CONTACT: FormSchema = FormSchema {
    kind: FormKind::Contact,
    admin_heading: "New Contact Message",
    admin_subject_prefix: "New Message from",
    fields: &[],
    confirmation_subject: "We received your message",
    confirmation_lines: &[
        "Thank you for reaching out.",
        "We will get back to you shortly.",
    ],
};

static PROJECT: FormSchema = FormSchema {
    kind: FormKind::Project,
    admin_heading: "New Project Inquiry",
    admin_subject_prefix: "New Project Inquiry from",
    fields: &[
        FieldSpec {
            field: OptionalField::Company,
            label: "Company",
            placeholder: "N/A",
            echo: false,
        },
        FieldSpec {
            field: OptionalField::Budget,
            label: "Budget",
            placeholder: "Not specified",
            echo: true,
        },
        FieldSpec {
            field: OptionalField::Timeline,
            label: "Timeline",
            placeholder: "Not specified",
            echo: true,
        },
    ],
    confirmation_subject: "We received your project inquiry",
    confirmation_lines: &[
        "Thank you for your project inquiry.",
        "We will get back to you within 24 hours.",
    ],
};

/// Subject and HTML body, without addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMail {
    pub subject: String,
    pub html: String,
}

impl FormSchema {
    pub fn for_kind(kind: FormKind) -> &'static FormSchema {
        match kind {
            FormKind::Contact => &CONTACT,
            FormKind::Project => &PROJECT,
        }
    }

    /// Operator notification: every field, placeholders for the absent ones, then the message.
    pub fn render_admin(&self, inquiry: &Inquiry) -> RenderedMail {
        let mut html = String::new();
        let _ = writeln!(html, "<h2>{}</h2>", self.admin_heading);
        push_row(&mut html, "Name", &inquiry.name);
        push_row(&mut html, "Email", &inquiry.email);
        for spec in self.fields {
            let value = inquiry.optional(spec.field).unwrap_or(spec.placeholder);
            push_row(&mut html, spec.label, value);
        }
        html.push_str("<hr/>\n");
        let _ = writeln!(html, "<p>{}</p>", escape_html(&inquiry.message));

        RenderedMail {
            subject: format!("{} {}", self.admin_subject_prefix, inquiry.name),
            html,
        }
    }

    /// Submitter confirmation.
    pub fn render_confirmation(&self, inquiry: &Inquiry) -> RenderedMail {
        let mut html = String::new();
        let _ = writeln!(html, "<h2>Hi {},</h2>", escape_html(&inquiry.name));
        for line in self.confirmation_lines {
            let _ = writeln!(html, "<p>{line}</p>");
        }
        for spec in self.fields.iter().filter(|s| s.echo) {
            let value = inquiry.optional(spec.field).unwrap_or(spec.placeholder);
            push_row(&mut html, spec.label, value);
        }

        RenderedMail {
            subject: self.confirmation_subject.to_string(),
            html,
        }
    }
}

fn push_row(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(
        html,
        "<p><strong>{}:</strong> {}</p>",
        label,
        escape_html(value)
    );
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
