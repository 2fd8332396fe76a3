//! Prompt templates and topic inference from channel labels.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    General,
    Defi,
    Crypto,
    Technical,
    Gaming,
}

impl PromptType {
    /// Infer a topic from a channel label; `None` means no keyword matched.
    pub fn infer(channel_label: &str) -> Option<Self> {
        topic_patterns()
            .iter()
            .find(|(_, pattern)| pattern.is_match(channel_label))
            .map(|(prompt_type, _)| *prompt_type)
    }

    pub fn template(self) -> &'static PromptTemplate {
        match self {
            PromptType::General => &GENERAL,
            PromptType::Defi => &DEFI,
            PromptType::Crypto => &CRYPTO,
            PromptType::Technical => &TECHNICAL,
            PromptType::Gaming => &GAMING,
        }
    }
}

// Checked in order, first match wins. Plain substrings, no word boundaries.
const TOPIC_KEYWORDS: &[(PromptType, &[&str])] = &[
    (
        PromptType::Defi,
        &[
            "defi", "yield", "farm", "staking", "liquidity", "lp", "lending", "borrowing", "amm",
            "swap", "stable",
        ],
    ),
    (
        PromptType::Crypto,
        &[
            "crypto", "bitcoin", "ethereum", "btc", "eth", "token", "coin", "trading", "market",
            "airdrop",
        ],
    ),
    (
        PromptType::Technical,
        &["dev", "code", "programming", "tech", "engineering"],
    ),
    (PromptType::Gaming, &["game", "gaming", "play", "stream"]),
];

static TOPIC_PATTERNS: OnceLock<Vec<(PromptType, Regex)>> = OnceLock::new();

fn topic_patterns() -> &'static [(PromptType, Regex)] {
    TOPIC_PATTERNS.get_or_init(|| {
        TOPIC_KEYWORDS
            .iter()
            .map(|(prompt_type, keywords)| {
                let alternation = keywords
                    .iter()
                    .map(|k| regex::escape(k))
                    .collect::<Vec<_>>()
                    .join("|");
                (
                    *prompt_type,
                    Regex::new(&format!("(?i:{alternation})")).unwrap(),
                )
            })
            .collect()
    })
}

#[derive(Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    pub system: &'static str,
    /// Takes `{text}` and optionally `{channel_name}`.
    pub user: &'static str,
}

impl PromptTemplate {
    /// An explicit prompt type wins, then keyword inference, then the general prompt.
    pub fn select(channel_label: &str, prompt_type: Option<PromptType>) -> &'static PromptTemplate {
        prompt_type
            .or_else(|| PromptType::infer(channel_label))
            .unwrap_or(PromptType::General)
            .template()
    }

    pub fn render(&self, text: &str, channel_name: &str) -> String {
        self.user
            .replace("{channel_name}", channel_name)
            .replace("{text}", text)
    }
}

pub const GENERAL: PromptTemplate = PromptTemplate {
    system: "You summarize chat conversations. Pull out the most significant \
information, stay objective and precise, and structure the result so it can be \
skimmed. Keep every relevant link that was shared. When numbers, statistics or \
financial strategies come up, call them out explicitly.",
    user: "Summarize the following conversation from #{channel_name}.\n\n\
Conversation transcript:\n{text}\n\n\
The summary should:\n\
- give a concise but complete overview of the main topics\n\
- highlight notable interactions, decisions and open questions\n\
- list the relevant links that were shared\n\
- point out any data or statistics and what they imply\n\
- use short sections and bullet points",
};

pub const DEFI: PromptTemplate = PromptTemplate {
    system: "You are a DeFi analyst reading community chat. Focus on yield \
farming and stablecoin strategies, liquidity provision, APY and APR figures, TVL \
movements, governance decisions, protocol risks and new launches or airdrops. \
Keep every link to protocols, dashboards and sources.",
    user: "Analyze the following DeFi conversation from #{channel_name}.\n\n\
Conversation transcript:\n{text}\n\n\
Report on:\n\
- concrete metrics (APY, TVL, prices) and where they came from\n\
- yield and stablecoin strategies together with their risk\n\
- arbitrage or cross-chain opportunities\n\
- upcoming launches, airdrops and governance votes\n\
- sentiment around the protocols mentioned\n\
- every relevant link\n\
Group the findings by protocol or strategy and put actionable items first.",
};

pub const CRYPTO: PromptTemplate = PromptTemplate {
    system: "You are a crypto market analyst reading community chat. Extract \
trading setups, price levels and the reasoning behind them, sentiment around major \
assets, on-chain signals, regulatory news and macro factors. Keep every link to \
charts, data and articles.",
    user: "Analyze the following market conversation from #{channel_name}.\n\n\
Conversation transcript:\n{text}\n\n\
Report on:\n\
- price levels, support and resistance, technical patterns\n\
- trading ideas and their timeframe\n\
- sentiment per asset\n\
- on-chain metrics and macro correlations\n\
- emerging narratives\n\
- every relevant link\n\
Group the findings by asset and put actionable items first.",
};

pub const TECHNICAL: PromptTemplate = PromptTemplate {
    system: "You summarize engineering discussions. Capture technical decisions \
and their trade-offs, reported bugs and their status, proposed designs, release \
news and unanswered questions. Keep code identifiers, versions and links exact.",
    user: "Summarize the following technical discussion from #{channel_name}.\n\n\
Conversation transcript:\n{text}\n\n\
Cover:\n\
- decisions made and the reasoning given\n\
- problems reported, workarounds and fixes\n\
- proposals still under discussion\n\
- releases, versions and tooling changes\n\
- open questions that need an owner\n\
- every relevant link",
};

pub const GAMING: PromptTemplate = PromptTemplate {
    system: "You summarize gaming community chat. Capture game news and updates, \
events and streams, strategies and tips that were shared, and the general mood of \
the community. Keep every link.",
    user: "Summarize the following gaming conversation from #{channel_name}.\n\n\
Conversation transcript:\n{text}\n\n\
Cover:\n\
- news, patches and announcements\n\
- scheduled events, tournaments and streams\n\
- strategies, builds and tips\n\
- community mood and recurring complaints\n\
- every relevant link",
};
