//! Analysis prompt generation
//!
//! Renders an exported bundle into the text prompt the user pastes into an AI
//! chat tool, along with per-tool instructions for getting the JSON answer
//! back into `ai-response.json`. Prompt text is written in Traditional Chinese,
//! the language of the exported notes.

use crate::error::{AnalyzerError, Result};
use crate::export::{ContextSummary, ExportBundle};
use crate::schema::response_template;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const PROMPT_VERSION: &str = "2.0";
pub const DEFAULT_PROMPT_FILE: &str = "enhanced-ai-prompt.txt";
pub const DEFAULT_RESPONSE_FILE: &str = "ai-response.json";

/// Conversations included verbatim in the prompt
const PROMPT_CONVERSATIONS: usize = 5;

/// Chat tools with dedicated paste instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiTool {
    #[default]
    Claude,
    Cursor,
    Chatgpt,
    Gemini,
}

impl AiTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiTool::Claude => "claude",
            AiTool::Cursor => "cursor",
            AiTool::Chatgpt => "chatgpt",
            AiTool::Gemini => "gemini",
        }
    }

    /// Step-by-step paste instructions for this tool
    pub fn instructions(&self, prompt_file: &str, response_file: &str) -> Vec<String> {
        match self {
            AiTool::Claude => vec![
                "🤖 Claude 分析指南:".to_string(),
                "1. 開啟 Claude (claude.ai)".to_string(),
                format!("2. 複製 {prompt_file} 中的完整內容"),
                "3. 直接貼上並發送".to_string(),
                "4. 等待詳細分析回覆".to_string(),
                format!("5. 複製完整 JSON 回覆到 {response_file}"),
            ],
            AiTool::Cursor => vec![
                "💻 Cursor AI 分析指南:".to_string(),
                "1. 開啟 Cursor 編輯器".to_string(),
                "2. 使用 Ctrl+K 開啟AI面板".to_string(),
                format!("3. 複製 {prompt_file} 中的分析指令"),
                "4. 專注於技術可行性分析".to_string(),
                format!("5. 將分析結果存到 {response_file}"),
            ],
            AiTool::Chatgpt => vec![
                "🧠 ChatGPT 分析指南:".to_string(),
                "1. 開啟 ChatGPT (chatgpt.com)".to_string(),
                "2. 選擇最新的模型以獲得最佳效果".to_string(),
                format!("3. 分段輸入 {prompt_file} 的內容避免截斷"),
                "4. 要求 JSON 格式回覆".to_string(),
                format!("5. 保存完整回覆到 {response_file}"),
            ],
            AiTool::Gemini => vec![
                "✨ Gemini 分析指南:".to_string(),
                "1. 開啟 Gemini (gemini.google.com)".to_string(),
                format!("2. 貼上 {prompt_file} 的完整內容"),
                "3. 提醒只輸出 JSON 代碼塊".to_string(),
                "4. 等待完整分析回覆".to_string(),
                format!("5. 保存完整回覆到 {response_file}"),
            ],
        }
    }
}

impl fmt::Display for AiTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiTool {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" => Ok(AiTool::Claude),
            "cursor" => Ok(AiTool::Cursor),
            "chatgpt" | "gpt" => Ok(AiTool::Chatgpt),
            "gemini" => Ok(AiTool::Gemini),
            other => Err(format!(
                "unknown AI tool '{other}' (expected claude, cursor, chatgpt, or gemini)"
            )),
        }
    }
}

/// Rendered prompt plus the facts it was rendered from
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisPrompt {
    pub version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub unrestricted: bool,
    /// BLAKE3 digest of the export bundle
    pub fingerprint: String,
    pub context: ContextSummary,
    pub text: String,
}

impl AnalysisPrompt {
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.text)
            .map_err(|e| AnalyzerError::io(path.display().to_string(), e))
    }
}

pub struct PromptBuilder<'a> {
    bundle: &'a ExportBundle,
    unrestricted: bool,
    generated_at: DateTime<Utc>,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(bundle: &'a ExportBundle) -> Self {
        Self {
            bundle,
            unrestricted: false,
            generated_at: Utc::now(),
        }
    }

    /// Ask for the optional `unrestricted_insights` section
    pub fn unrestricted(mut self, unrestricted: bool) -> Self {
        self.unrestricted = unrestricted;
        self
    }

    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    pub fn build(self) -> Result<AnalysisPrompt> {
        let context = ContextSummary::from_bundle(self.bundle);
        let fingerprint = self.bundle.fingerprint()?;
        let conversations =
            serde_json::to_string_pretty(self.bundle.recent_conversations(PROMPT_CONVERSATIONS))?;
        let connections = serde_json::to_string_pretty(&self.bundle.connections)?;
        let inspirations = serde_json::to_string_pretty(&self.bundle.inspirations)?;

        let mode = if self.unrestricted {
            "🔓 擴展模式"
        } else {
            "🔒 標準模式"
        };
        let topics = if context.recent_topics.is_empty() {
            "(無)".to_string()
        } else {
            context.recent_topics.join(" / ")
        };
        let last_interaction = context.last_interaction.as_deref().unwrap_or("(無)");

        let text = format!(
            r#"
🚀 靈感心電圖增強分析系統 v{version}

═══════════════════════════════════════════════════════════

📊 系統狀態:
- 分析模式: {mode}
- 分析時間: {generated_at}
- 數據指紋: {fingerprint}
- 靈感數量: {inspiration_count}
- 對話歷史: {conversation_count} 筆 (近期有回饋 {feedback_count} 筆)
- 最近互動: {last_interaction}
- 近期主題: {topics}

📋 分析任務:

🔍 1. 深度上下文分析
請基於以下完整對話歷史進行連續性分析：
{conversations}

🧠 2. 靈感關聯網絡分析
分析靈感之間的深層連結：
{connections}

🎯 3. 當前靈感數據深度解析
{inspirations}

📈 4. 預測性洞察
基於歷史數據預測：
- 下一個可能的靈感方向
- 潛在的實施障礙
- 市場機會評估
- 技術可行性分析

🎭 5. 角色扮演分析
請以以下不同視角分析：
- 🏢 企業高管視角
- 🎨 創意設計師視角
- 💻 技術架構師視角
- 💰 投資人視角
- 🎯 用戶體驗師視角

📝 回應格式要求:
請使用以下 JSON 格式回應：

```json
{template}
```

════════════════════════════════════════════════════════════

🎯 特別提醒:
1. 請保持與之前對話的連續性
2. 參考用戶之前的回應和實施進度
3. 提供具體可行的建議，而非泛泛而談
4. 遵循標準分析框架
5. 重點關注創新性和實用性的平衡

開始分析 →
"#,
            version = PROMPT_VERSION,
            generated_at = self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            inspiration_count = self.bundle.inspirations.len(),
            conversation_count = context.conversation_count,
            feedback_count = context.feedback_count,
            template = response_template(self.unrestricted),
        );

        tracing::info!(
            unrestricted = self.unrestricted,
            inspirations = self.bundle.inspirations.len(),
            chars = text.chars().count(),
            "rendered analysis prompt"
        );

        Ok(AnalysisPrompt {
            version: PROMPT_VERSION,
            generated_at: self.generated_at,
            unrestricted: self.unrestricted,
            fingerprint,
            context,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Inspiration;

    fn bundle() -> ExportBundle {
        ExportBundle {
            inspirations: vec![Inspiration {
                title: "Night market map".to_string(),
                content: "Crowd-sourced stall ratings".to_string(),
                tags: vec!["food".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_prompt_contains_data_and_template() {
        let b = bundle();
        let prompt = PromptBuilder::new(&b).build().unwrap();
        assert!(prompt.text.contains("Night market map"));
        assert!(prompt.text.contains("```json"));
        assert!(prompt.text.contains("\"actionable_recommendations\""));
        assert!(prompt.text.contains(&prompt.fingerprint));
        assert!(!prompt.text.contains("unrestricted_insights"));
    }

    #[test]
    fn test_unrestricted_adds_section() {
        let b = bundle();
        let prompt = PromptBuilder::new(&b).unrestricted(true).build().unwrap();
        assert!(prompt.unrestricted);
        assert!(prompt.text.contains("unrestricted_insights"));
    }

    #[test]
    fn test_tool_parsing_and_instructions() {
        assert_eq!("ChatGPT".parse::<AiTool>().unwrap(), AiTool::Chatgpt);
        assert!("copilot".parse::<AiTool>().is_err());
        for tool in [AiTool::Claude, AiTool::Cursor, AiTool::Chatgpt, AiTool::Gemini] {
            let steps = tool.instructions("p.txt", "r.json");
            assert_eq!(steps.len(), 6);
            assert!(steps.iter().any(|s| s.contains("p.txt")));
        }
    }
}
