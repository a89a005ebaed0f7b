use crate::config::santa_config::SantaConfig;
use crate::core::dispatch::OutboundMessage;
use crate::core::matcher::Matcher;
use crate::core::message::MessageTemplate;
use crate::domain::model::{Assignment, MatchMode, Participant, Target};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use rand::Rng;
use serde::Serialize;

/// 一次抽籤所需的全部輸入，每次執行都從配置重新建立
#[derive(Debug, Clone)]
pub struct SecretSantaDraw {
    participants: Vec<Participant>,
    pool: Vec<Target>,
    template: MessageTemplate,
    mode: MatchMode,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
pub struct DrawResult {
    pub mode: MatchMode,
    pub assignments: Vec<Assignment>,
    pub messages: Vec<OutboundMessage>,
}

#[derive(Debug, Serialize)]
struct PairingView<'a> {
    giver: &'a str,
    target: &'a str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct DrawView<'a> {
    mode: MatchMode,
    pairings: Vec<PairingView<'a>>,
}

impl SecretSantaDraw {
    pub fn new(
        participants: Vec<Participant>,
        pool: Vec<Target>,
        template: MessageTemplate,
        mode: MatchMode,
    ) -> Self {
        Self {
            participants,
            pool,
            template,
            mode,
            matcher: Matcher::default(),
        }
    }

    pub fn from_config(config: &SantaConfig) -> Result<Self> {
        config.validate()?;

        let participants = config.participants()?;
        let pool = config.target_pool(&participants);
        let template = MessageTemplate::parse(config.message_template()?)?;

        tracing::info!(
            "🎁 Loaded {} participant(s) in {:?} mode",
            participants.len(),
            config.mode()
        );
        Ok(Self::new(participants, pool, template, config.mode()))
    }

    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DrawResult> {
        let assignments = self.matcher.assign(&self.participants, &self.pool, rng)?;

        // 訊息發給送禮者本人，內容告知其對象
        let messages = assignments
            .iter()
            .map(|assignment| OutboundMessage {
                giver: assignment.giver.name().to_string(),
                destination: assignment.giver.phone().to_string(),
                body: self.template.render(assignment),
            })
            .collect();

        Ok(DrawResult {
            mode: self.mode,
            assignments,
            messages,
        })
    }
}

impl DrawResult {
    /// 試跑模式的輸出
    pub fn summary(&self) -> String {
        let pairings = self
            .assignments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "\nTest pairings:\n\n{}\n\nTo send out SMS messages with new pairings,\ncall with the --send argument:\n\n    $ secret-santa --send\n",
            pairings
        )
    }

    pub fn to_json(&self) -> Result<String> {
        let view = DrawView {
            mode: self.mode,
            pairings: self
                .assignments
                .iter()
                .zip(&self.messages)
                .map(|(assignment, message)| PairingView {
                    giver: assignment.giver.name(),
                    target: assignment.target.label(),
                    message: &message.body,
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&view)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> SantaConfig {
        SantaConfig::from_yaml_str(
            r#"
PARTICIPANTS:
  - {name: Ann, phone: "+12065550101", dont_pair: [Socks]}
  - {name: Bob, phone: "+12065550102"}
MESSAGE: "{santa} gets {category}"
CATEGORIES: [Socks, Candy]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_draw_renders_messages_for_givers() {
        let draw = SecretSantaDraw::from_config(&config()).unwrap();
        let result = draw.draw(&mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(result.mode, MatchMode::Categories);
        assert_eq!(result.messages[0].destination, "+12065550101");
        assert_eq!(result.messages[0].body, "Ann gets Candy");
        assert_eq!(result.messages[1].body, "Bob gets Socks");
    }

    #[test]
    fn test_summary_and_json() {
        let draw = SecretSantaDraw::from_config(&config()).unwrap();
        let result = draw.draw(&mut StdRng::seed_from_u64(7)).unwrap();

        let summary = result.summary();
        assert!(summary.contains("Test pairings:"));
        assert!(summary.contains("Ann ---> Candy"));
        assert!(summary.contains("--send"));

        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["mode"], "categories");
        assert_eq!(json["pairings"][1]["target"], "Socks");
        // JSON 輸出不包含電話號碼
        assert!(!result.to_json().unwrap().contains("+1206"));
    }

    #[test]
    fn test_draw_with_custom_matcher() {
        let draw = SecretSantaDraw::from_config(&config())
            .unwrap()
            .with_matcher(Matcher::with_max_attempts(0));
        let result = draw.draw(&mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(result.messages[0].body, "Ann gets Candy");
        assert_eq!(result.messages[1].body, "Bob gets Socks");
    }

    #[test]
    fn test_invalid_template_fails_before_drawing() {
        let mut config = config();
        config.message = Some("{santa} gets {gift}".to_string());
        assert!(SecretSantaDraw::from_config(&config)
            .unwrap_err()
            .is_config_error());
    }
}
