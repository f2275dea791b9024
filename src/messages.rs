//! Localized message tables for validation reports, repair logs and display titles
//!
//! Every human-readable string the analyzer emits lives here so reports can be
//! switched between locales without touching the validation code. Templates use
//! a single `{field}` placeholder filled by [`fill`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported output locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "en")]
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::ZhTw => "zh-TW",
            Locale::En => "en",
        }
    }

    /// Message table for this locale
    pub fn messages(&self) -> &'static Messages {
        match self {
            Locale::ZhTw => &ZH_TW,
            Locale::En => &EN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh-tw" | "zh_tw" | "zh" => Ok(Locale::ZhTw),
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

/// Replace the `{field}` placeholder in a template
pub fn fill(template: &str, field: &str) -> String {
    template.replace("{field}", field)
}

/// All user-facing strings for one locale
#[derive(Debug)]
pub struct Messages {
    // Structure
    pub missing_section: &'static str,
    pub section_not_object: &'static str,
    pub unrestricted_section_recommended: &'static str,
    pub contextual_field_missing: &'static str,
    pub recommendation_not_array: &'static str,
    pub confidence_out_of_range: &'static str,

    // Quality
    pub shallow_analysis: &'static str,
    pub low_actionability: &'static str,
    pub more_innovation: &'static str,

    // Continuity
    pub strong_continuity: &'static str,
    pub weak_continuity: &'static str,
    pub missing_continuity_score: &'static str,
    pub tracked_suggestions: &'static str,
    pub untracked_suggestions: &'static str,

    // Repair log
    pub repaired_missing_section: &'static str,
    pub repaired_array_type: &'static str,
    pub enhanced_actionability: &'static str,
    pub added_continuity_hint: &'static str,
    pub continuity_placeholder: &'static str,
    pub action_suffix: &'static str,

    // Canned section content
    pub default_engagement_pattern: &'static str,
    pub default_evolution_trend: &'static str,
    pub default_immediate_action: &'static str,
    pub default_short_term_goal: &'static str,
    pub default_long_term_vision: &'static str,
    pub default_follow_up: &'static str,

    // Failure suggestions
    pub json_format_suggestions: [&'static str; 3],
    pub too_short_suggestions: [&'static str; 2],
    pub no_json_suggestions: [&'static str; 2],

    // Display titles
    pub title_context: &'static str,
    pub title_deep_dive: &'static str,
    pub title_network: &'static str,
    pub title_perspectives: &'static str,
    pub title_predictive: &'static str,
    pub title_recommendations: &'static str,
    pub title_unrestricted: &'static str,
    pub unrestricted_caution: &'static str,
    pub title_meta: &'static str,
}

pub static ZH_TW: Messages = Messages {
    missing_section: "缺少必需字段: {field}",
    section_not_object: "字段 {field} 應該是對象類型",
    unrestricted_section_recommended: "無限制模式下建議包含 unrestricted_insights 字段",
    contextual_field_missing: "contextual_analysis 缺少 {field}",
    recommendation_not_array: "actionable_recommendations.{field} 應該是數組",
    confidence_out_of_range: "confidence_level 應該是 0-100 之間的數字",

    shallow_analysis: "分析深度不足，建議提供更詳細的見解",
    low_actionability: "建議缺乏可操作性，需要更具體的行動步驟",
    more_innovation: "可以加入更多創新和突破性的思考",

    strong_continuity: "優秀的對話連續性",
    weak_continuity: "對話連續性較弱，可能遺漏了重要上下文",
    missing_continuity_score: "缺少對話連續性評分",
    tracked_suggestions: "有效追蹤了之前的建議狀態",
    untracked_suggestions: "未能有效追蹤之前的建議實施狀態",

    repaired_missing_section: "已修復缺失字段: {field}",
    repaired_array_type: "已修復數組類型: {field}",
    enhanced_actionability: "已增強建議的可操作性",
    added_continuity_hint: "已添加連續性改善建議",
    continuity_placeholder: "建議補充之前對話的具體參考信息",
    action_suffix: " (建議在1-2天內完成)",

    default_engagement_pattern: "需要更多數據進行分析",
    default_evolution_trend: "持續觀察中",
    default_immediate_action: "進一步分析需求",
    default_short_term_goal: "制定詳細計劃",
    default_long_term_vision: "持續優化和改進",
    default_follow_up: "需要更多具體信息",

    json_format_suggestions: [
        "確認AI回覆包含有效的JSON格式",
        "檢查是否有未閉合的括號或引號",
        "嘗試使用JSON驗證工具檢查格式",
    ],
    too_short_suggestions: [
        "AI回覆似乎太短，可能未完整生成",
        "嘗試要求AI提供更詳細的分析",
    ],
    no_json_suggestions: ["回覆中沒有找到JSON內容", "確認AI理解了JSON格式要求"],

    title_context: "🔗 對話連續性分析",
    title_deep_dive: "🧠 深度靈感分析",
    title_network: "🕸️ 靈感關聯網絡",
    title_perspectives: "👥 多角度分析",
    title_predictive: "🔮 預測性洞察",
    title_recommendations: "🎯 具體行動建議",
    title_unrestricted: "🚨 擴展分析洞察",
    unrestricted_caution: "此內容包含突破性分析，請謹慎使用",
    title_meta: "📊 分析元數據",
};

pub static EN: Messages = Messages {
    missing_section: "Missing required section: {field}",
    section_not_object: "Section {field} should be an object",
    unrestricted_section_recommended: "Unrestricted mode expects an unrestricted_insights section",
    contextual_field_missing: "contextual_analysis is missing {field}",
    recommendation_not_array: "actionable_recommendations.{field} should be an array",
    confidence_out_of_range: "confidence_level should be a number between 0 and 100",

    shallow_analysis: "Analysis lacks depth; provide more detailed insights",
    low_actionability: "Recommendations lack actionability; concrete steps are needed",
    more_innovation: "Consider adding more innovative, breakthrough thinking",

    strong_continuity: "Excellent conversation continuity",
    weak_continuity: "Weak conversation continuity; important context may be missing",
    missing_continuity_score: "Missing conversation continuity score",
    tracked_suggestions: "Previous suggestions were tracked",
    untracked_suggestions: "Previous suggestion status was not tracked",

    repaired_missing_section: "Repaired missing section: {field}",
    repaired_array_type: "Repaired array type: {field}",
    enhanced_actionability: "Enhanced recommendation actionability",
    added_continuity_hint: "Added continuity improvement hint",
    continuity_placeholder: "Add concrete references to the previous conversation",
    action_suffix: " (recommend completing within 1-2 days)",

    default_engagement_pattern: "More data needed for analysis",
    default_evolution_trend: "Under observation",
    default_immediate_action: "Analyze requirements further",
    default_short_term_goal: "Draft a detailed plan",
    default_long_term_vision: "Keep optimizing and improving",
    default_follow_up: "More specific information needed",

    json_format_suggestions: [
        "Make sure the AI response contains valid JSON",
        "Check for unbalanced brackets or quotes",
        "Try running the response through a JSON validator",
    ],
    too_short_suggestions: [
        "The response seems too short and may be truncated",
        "Ask the AI for a more detailed analysis",
    ],
    no_json_suggestions: [
        "No JSON content was found in the response",
        "Make sure the AI understood the JSON format requirement",
    ],

    title_context: "🔗 Conversation continuity",
    title_deep_dive: "🧠 Inspiration deep dive",
    title_network: "🕸️ Inspiration network",
    title_perspectives: "👥 Multiple perspectives",
    title_predictive: "🔮 Predictive insights",
    title_recommendations: "🎯 Actionable recommendations",
    title_unrestricted: "🚨 Extended insights",
    unrestricted_caution: "This section contains speculative analysis; use with care",
    title_meta: "📊 Analysis metadata",
};
