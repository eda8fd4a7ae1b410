use serde::Serialize;

const TEAM_CATALOG_URL: &str = "https://teamkatalog.nav.no";
const CONSOLE_URL: &str = "https://console.nav.cloud.nais.io";

/// Block-structured chat message: optional header, divider, markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    header: Option<String>,
    body: String,
}

impl Message {
    /// Body-only message (a single markdown section).
    pub fn markdown(body: impl Into<String>) -> Self {
        Self {
            header: None,
            body: body.into(),
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Plain text shown in notifications and by clients that cannot render blocks.
    pub fn fallback_text(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.body)
    }

    pub fn blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(3);
        if let Some(header) = &self.header {
            blocks.push(Block::Header {
                text: TextObject::plain(header),
            });
            blocks.push(Block::Divider);
        }
        blocks.push(Block::Section {
            text: TextObject::markdown(&self.body),
        });
        blocks
    }

    // -----------------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------------

    /// Team exists in Nais Console but has no entry in the team catalog.
    pub fn missing_from_catalog(team_slug: &str) -> Self {
        Message::markdown(missing_from_catalog_text(team_slug))
            .with_header(format!(":wave: Hei, {team_slug}"))
    }

    /// Repository linked to a team has Dependabot alerts switched off.
    ///
    /// Not sent by any command yet; kept for the Dependabot notifier, which
    /// has no repository scan to drive it.
    pub fn dependabot_alerts_disabled(team_slug: &str, repo: &str) -> Self {
        Message::markdown(format!(
            "Dere har knyttet GitHub-repoet <https://github.com/{repo}|{repo}> opp til teamet deres via \
             <{CONSOLE_URL}/team/{team_slug}/repositories|Console>. Dette repoet har ikke Dependabot alerts aktivert. \
             Dependabot hjelper deg å oppdage biblioteker med kjente sårbarheter i appene dine. \
             Du kan sjekke status og enable Dependabot <https://github.com/{repo}/security|her>. \
             Hvis repoet ikke er i bruk, vurder å arkivere det. \
             Det kan gjøres nederst på <https://github.com/{repo}/settings|denne siden>."
        ))
        .with_header(format!(":wave: Hei, {team_slug} :github2:"))
    }
}

/// Direct-message text for owners of a team missing from the catalog.
pub fn direct_message_text(team_slug: &str) -> String {
    format!(":wave: Hei! {}", missing_from_catalog_text(team_slug))
}

fn missing_from_catalog_text(team_slug: &str) -> String {
    format!(
        "Teamet deres *{team_slug}* finnes i Nais Console, men mangler i Teamkatalogen. \
         For å sikre god oversikt og oppdatert informasjon, ber vi dere om å legge til teamet i \
         <{TEAM_CATALOG_URL}|Teamkatalogen>. Takk!"
    )
}

// ---------------------------------------------------------------------------
// Wire blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { text: TextObject },
    Divider,
    Section { text: TextObject },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

impl TextObject {
    fn plain(text: &str) -> Self {
        Self {
            kind: "plain_text",
            text: text.to_string(),
        }
    }

    fn markdown(text: &str) -> Self {
        Self {
            kind: "mrkdwn",
            text: text.to_string(),
        }
    }
}
