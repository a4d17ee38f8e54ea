#![allow(dead_code)]

//! Document → SVG preview rendering. One A4-width column, three visual
//! styles over the same section structure. The markup is standalone (own
//! white background, explicit dimensions) so the rasterizer can render it
//! off-screen at any scale.

use super::metrics::SANS;
use super::PreviewDocument;
use crate::auth::session::Language;
use crate::models::resume::{PersonalInfo, ResumeData, ResumeStyle};

/// A4 width at 96 dpi. Height is whatever the content needs; the preview
/// is intentionally unclipped; pagination happens at export time.
pub const PAGE_WIDTH_PX: f32 = 794.0;

const MARGIN_PX: f32 = 48.0;
const CONTENT_WIDTH_PX: f32 = PAGE_WIDTH_PX - 2.0 * MARGIN_PX;

struct Theme {
    accent: &'static str,
    body: &'static str,
    muted: &'static str,
    base_font: f32,
    line_height: f32,
    section_gap: f32,
    centered_header: bool,
    accent_band: bool,
}

fn theme(style: ResumeStyle) -> Theme {
    match style {
        ResumeStyle::Style1 => Theme {
            accent: "#1f2937",
            body: "#111827",
            muted: "#6b7280",
            base_font: 14.0,
            line_height: 20.0,
            section_gap: 26.0,
            centered_header: true,
            accent_band: false,
        },
        ResumeStyle::Style2 => Theme {
            accent: "#2563eb",
            body: "#111827",
            muted: "#6b7280",
            base_font: 14.0,
            line_height: 20.0,
            section_gap: 26.0,
            centered_header: false,
            accent_band: true,
        },
        ResumeStyle::Style3 => Theme {
            accent: "#047857",
            body: "#1f2937",
            muted: "#6b7280",
            base_font: 12.0,
            line_height: 16.0,
            section_gap: 18.0,
            centered_header: false,
            accent_band: false,
        },
    }
}

struct Labels {
    summary: &'static str,
    education: &'static str,
    experience: &'static str,
    skills: &'static str,
}

fn labels(locale: Language) -> Labels {
    match locale {
        Language::Zh => Labels {
            summary: "个人简介",
            education: "教育背景",
            experience: "工作经历",
            skills: "技能",
        },
        Language::En => Labels {
            summary: "Summary",
            education: "Education",
            experience: "Experience",
            skills: "Skills",
        },
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Accumulates `<text>`/`<rect>` elements while tracking the flowed y
/// cursor. The final cursor position becomes the document height.
struct Flow {
    out: String,
    y: f32,
}

impl Flow {
    fn new() -> Self {
        Flow {
            out: String::new(),
            y: MARGIN_PX,
        }
    }

    fn text(&mut self, x: f32, size: f32, weight: &str, fill: &str, anchor: &str, s: &str) {
        self.out.push_str(&format!(
            "<text x=\"{x:.1}\" y=\"{:.1}\" font-family=\"sans-serif\" font-size=\"{size:.1}\" \
             font-weight=\"{weight}\" fill=\"{fill}\" text-anchor=\"{anchor}\">{}</text>\n",
            self.y,
            escape_xml(s)
        ));
    }

    fn rule(&mut self, color: &str) {
        self.out.push_str(&format!(
            "<rect x=\"{MARGIN_PX:.1}\" y=\"{:.1}\" width=\"{CONTENT_WIDTH_PX:.1}\" height=\"1\" fill=\"{color}\"/>\n",
            self.y
        ));
    }

    fn advance(&mut self, dy: f32) {
        self.y += dy;
    }
}

fn wrapped_block(flow: &mut Flow, text: &str, font: f32, line_height: f32, fill: &str) {
    let max_em = CONTENT_WIDTH_PX / font;
    for line in SANS.wrap(text, max_em) {
        flow.advance(line_height);
        flow.text(MARGIN_PX, font, "normal", fill, "start", &line);
    }
}

fn section_title(flow: &mut Flow, title: &str, theme: &Theme) {
    flow.advance(theme.section_gap);
    flow.advance(theme.base_font + 4.0);
    flow.text(
        MARGIN_PX,
        theme.base_font + 4.0,
        "bold",
        theme.accent,
        "start",
        title,
    );
    flow.advance(6.0);
    flow.rule("#e5e7eb");
}

fn date_range(start: &str, end: &str) -> String {
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (false, false) => format!("{start} ~ {end}"),
    }
}

fn header(flow: &mut Flow, info: &PersonalInfo, theme: &Theme) {
    let anchor_x = if theme.centered_header {
        PAGE_WIDTH_PX / 2.0
    } else {
        MARGIN_PX
    };
    let anchor = if theme.centered_header { "middle" } else { "start" };

    flow.advance(theme.base_font * 2.0);
    if !info.name.is_empty() {
        flow.text(anchor_x, theme.base_font * 2.0, "bold", theme.body, anchor, &info.name);
    }

    let contact: Vec<&str> = [&info.email, &info.phone, &info.address]
        .into_iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    if !contact.is_empty() {
        flow.advance(theme.line_height + 4.0);
        flow.text(
            anchor_x,
            theme.base_font - 1.0,
            "normal",
            theme.muted,
            anchor,
            &contact.join("  ·  "),
        );
    }

    let details: Vec<&str> = [&info.gender, &info.birth_date]
        .into_iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    if !details.is_empty() {
        flow.advance(theme.line_height);
        flow.text(
            anchor_x,
            theme.base_font - 1.0,
            "normal",
            theme.muted,
            anchor,
            &details.join("  ·  "),
        );
    }

    // Photo, when present as a data URI, sits in the top-right corner.
    if info.photo.starts_with("data:image/") {
        let size = 72.0;
        flow.out.push_str(&format!(
            "<image x=\"{:.1}\" y=\"{MARGIN_PX:.1}\" width=\"{size:.1}\" height=\"{size:.1}\" \
             preserveAspectRatio=\"xMidYMid slice\" href=\"{}\"/>\n",
            PAGE_WIDTH_PX - MARGIN_PX - size,
            escape_xml(&info.photo)
        ));
    }
}

/// Renders the document into standalone SVG at its natural height.
/// Pure with respect to its inputs: the same document, style and locale
/// always produce identical markup.
pub fn render_preview(data: &ResumeData, style: ResumeStyle, locale: Language) -> PreviewDocument {
    let theme = theme(style);
    let labels = labels(locale);
    let mut flow = Flow::new();

    header(&mut flow, &data.personal_info, &theme);

    if !data.personal_info.summary.trim().is_empty() {
        section_title(&mut flow, labels.summary, &theme);
        wrapped_block(
            &mut flow,
            &data.personal_info.summary,
            theme.base_font,
            theme.line_height,
            theme.body,
        );
    }

    if !data.education.is_empty() {
        section_title(&mut flow, labels.education, &theme);
        for entry in &data.education {
            flow.advance(theme.line_height + 2.0);
            flow.text(MARGIN_PX, theme.base_font, "bold", theme.body, "start", &entry.school);
            let dates = date_range(&entry.start_date, &entry.end_date);
            if !dates.is_empty() {
                flow.text(
                    PAGE_WIDTH_PX - MARGIN_PX,
                    theme.base_font - 1.0,
                    "normal",
                    theme.muted,
                    "end",
                    &dates,
                );
            }
            let qualification: Vec<&str> = [&entry.degree, &entry.major]
                .into_iter()
                .map(String::as_str)
                .filter(|s| !s.is_empty())
                .collect();
            if !qualification.is_empty() {
                flow.advance(theme.line_height);
                flow.text(
                    MARGIN_PX,
                    theme.base_font - 1.0,
                    "normal",
                    theme.muted,
                    "start",
                    &qualification.join(" · "),
                );
            }
            if !entry.description.trim().is_empty() {
                wrapped_block(
                    &mut flow,
                    &entry.description,
                    theme.base_font - 1.0,
                    theme.line_height,
                    theme.body,
                );
            }
        }
    }

    if !data.experience.is_empty() {
        section_title(&mut flow, labels.experience, &theme);
        for entry in &data.experience {
            flow.advance(theme.line_height + 2.0);
            flow.text(MARGIN_PX, theme.base_font, "bold", theme.body, "start", &entry.company);
            let dates = date_range(&entry.start_date, &entry.end_date);
            if !dates.is_empty() {
                flow.text(
                    PAGE_WIDTH_PX - MARGIN_PX,
                    theme.base_font - 1.0,
                    "normal",
                    theme.muted,
                    "end",
                    &dates,
                );
            }
            if !entry.position.is_empty() {
                flow.advance(theme.line_height);
                flow.text(
                    MARGIN_PX,
                    theme.base_font - 1.0,
                    "normal",
                    theme.muted,
                    "start",
                    &entry.position,
                );
            }
            if !entry.description.trim().is_empty() {
                wrapped_block(
                    &mut flow,
                    &entry.description,
                    theme.base_font - 1.0,
                    theme.line_height,
                    theme.body,
                );
            }
        }
    }

    if !data.skills.is_empty() {
        section_title(&mut flow, labels.skills, &theme);
        for skill in &data.skills {
            if skill.description.trim().is_empty() {
                continue;
            }
            wrapped_block(
                &mut flow,
                &format!("• {}", skill.description),
                theme.base_font,
                theme.line_height,
                theme.body,
            );
        }
    }

    let height = (flow.y + MARGIN_PX).ceil() as u32;
    let width = PAGE_WIDTH_PX as u32;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">\n"
    ));
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
    if theme.accent_band {
        svg.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"6\" height=\"{height}\" fill=\"{}\"/>\n",
            theme.accent
        ));
    }
    svg.push_str(&flow.out);
    svg.push_str("</svg>\n");

    PreviewDocument { svg, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ExperienceEntry, SkillEntry};

    fn sample() -> ResumeData {
        let mut data = ResumeData::empty();
        data.personal_info.name = "Grace Hopper".to_string();
        data.personal_info.email = "grace@example.com".to_string();
        data.personal_info.summary = "Computing pioneer.".to_string();
        let mut e = EducationEntry::new();
        e.school = "Yale".to_string();
        e.degree = "PhD".to_string();
        data.education.push(e);
        let mut x = ExperienceEntry::new();
        x.company = "US Navy".to_string();
        x.position = "Rear Admiral".to_string();
        data.experience.push(x);
        data
    }

    #[test]
    fn test_preview_contains_document_content() {
        let doc = render_preview(&sample(), ResumeStyle::Style1, Language::En);
        assert!(doc.svg.contains("Grace Hopper"));
        assert!(doc.svg.contains("Yale"));
        assert!(doc.svg.contains("US Navy"));
        assert!(doc.svg.contains("Education"));
        assert_eq!(doc.width, PAGE_WIDTH_PX as u32);
    }

    #[test]
    fn test_localized_section_titles() {
        let doc = render_preview(&sample(), ResumeStyle::Style1, Language::Zh);
        assert!(doc.svg.contains("教育背景"));
        assert!(doc.svg.contains("工作经历"));
        assert!(!doc.svg.contains(">Education<"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let mut data = sample();
        data.personal_info.name = "<Acme & Co> \"quoted\"".to_string();
        let doc = render_preview(&data, ResumeStyle::Style2, Language::En);
        assert!(doc.svg.contains("&lt;Acme &amp; Co&gt;"));
        assert!(!doc.svg.contains("<Acme"));
    }

    #[test]
    fn test_height_grows_with_content() {
        let short = render_preview(&sample(), ResumeStyle::Style1, Language::En);

        let mut data = sample();
        for i in 0..12 {
            let mut s = SkillEntry::new();
            s.description = format!("Skill number {i} with a reasonably long description");
            data.skills.push(s);
        }
        let tall = render_preview(&data, ResumeStyle::Style1, Language::En);
        assert!(tall.height > short.height);
    }

    #[test]
    fn test_entries_render_in_collection_order() {
        let mut data = ResumeData::empty();
        for company in ["Alpha", "Beta", "Gamma"] {
            let mut x = ExperienceEntry::new();
            x.company = company.to_string();
            data.experience.push(x);
        }
        let doc = render_preview(&data, ResumeStyle::Style1, Language::En);
        let a = doc.svg.find("Alpha").unwrap();
        let b = doc.svg.find("Beta").unwrap();
        let g = doc.svg.find("Gamma").unwrap();
        assert!(a < b && b < g, "display order must follow collection order");
    }

    #[test]
    fn test_styles_differ_but_share_content() {
        let data = sample();
        let s1 = render_preview(&data, ResumeStyle::Style1, Language::En);
        let s2 = render_preview(&data, ResumeStyle::Style2, Language::En);
        let s3 = render_preview(&data, ResumeStyle::Style3, Language::En);
        assert_ne!(s1.svg, s2.svg);
        assert_ne!(s2.svg, s3.svg);
        for doc in [&s1, &s2, &s3] {
            assert!(doc.svg.contains("Grace Hopper"));
        }
        // The compact style flows tighter for the same content.
        assert!(s3.height < s1.height);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let data = sample();
        let a = render_preview(&data, ResumeStyle::Style2, Language::En);
        let b = render_preview(&data, ResumeStyle::Style2, Language::En);
        assert_eq!(a, b);
    }
}
