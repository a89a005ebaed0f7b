use crate::domain::model::Assignment;
use crate::utils::error::{Result, SantaError};
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Giver,
    Target,
}

/// 訊息樣板，支援具名、位置與空白 `{}` 插槽
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    segments: Vec<Segment>,
}

fn slot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{|\}\}|\{([A-Za-z0-9_]*)\}").expect("slot pattern is valid")
    })
}

impl MessageTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let invalid = |reason: String| SantaError::InvalidConfigValueError {
            field: "MESSAGE".to_string(),
            value: template.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut text = String::new();
        let mut last = 0;
        let mut bare_slots = 0;

        for caps in slot_pattern().captures_iter(template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            text.push_str(&template[last..whole.start()]);
            last = whole.end();

            let slot = match whole.as_str() {
                "{{" => {
                    text.push('{');
                    continue;
                }
                "}}" => {
                    text.push('}');
                    continue;
                }
                _ => &caps[1],
            };

            let segment = match slot {
                "" => {
                    bare_slots += 1;
                    match bare_slots {
                        1 => Segment::Giver,
                        2 => Segment::Target,
                        _ => return Err(invalid("At most two {} slots are supported".to_string())),
                    }
                }
                "santa" | "giver" | "0" => Segment::Giver,
                "santee" | "receiver" | "category" | "target" | "1" => Segment::Target,
                other => return Err(invalid(format!("Unknown slot {{{}}}", other))),
            };

            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            segments.push(segment);
        }

        text.push_str(&template[last..]);
        if text.contains('{') || text.contains('}') {
            return Err(invalid("Unbalanced brace, use {{ or }} for literals".to_string()));
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self { segments })
    }

    pub fn render(&self, assignment: &Assignment) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => text.as_str(),
                Segment::Giver => assignment.giver.name(),
                Segment::Target => assignment.target.label(),
            })
            .collect()
    }
}
