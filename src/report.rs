//! Chat digest rendering (Feishu markdown).
//!
//! Each tier is cut to `per_tier_limit` entries without a "+N more" marker;
//! the result file keeps the full lists.

use chrono::NaiveDate;

use crate::config::MessageConfig;
use crate::record::{TenderRecord, Tiers};

const UNKNOWN_REGION: &str = "未知";

fn push_high(out: &mut String, n: usize, r: &TenderRecord) {
    out.push_str(&format!("\n{n}. **{}**\n", r.title));
    out.push_str(&format!(
        "   📍 {} | 💰 需点击查看 | 📅 {}\n",
        r.region.as_deref().unwrap_or(UNKNOWN_REGION),
        r.date
    ));
    out.push_str(&format!("   🔗 [查看详情]({})\n", r.link));
    out.push_str(&format!("   🏷️ 关键词：{}\n", r.keywords.join(", ")));
}

fn push_medium(out: &mut String, n: usize, r: &TenderRecord) {
    out.push_str(&format!("\n{n}. {}\n", r.title));
    out.push_str(&format!(
        "   📍 {} | 📅 {}\n",
        r.region.as_deref().unwrap_or(UNKNOWN_REGION),
        r.date
    ));
    out.push_str(&format!("   🔗 [查看详情]({})\n", r.link));
}

pub fn format_message(tiers: &Tiers, date: NaiveDate, cfg: &MessageConfig) -> String {
    let limit = cfg.per_tier_limit;
    let mut out = format!("🎯 **每日情报推送（{}）**\n\n", date.format("%Y-%m-%d"));

    if !tiers.high.is_empty() {
        out.push_str("**🔴 高优先级（建议立即联系）**\n");
        for (i, r) in tiers.high.iter().take(limit).enumerate() {
            push_high(&mut out, i + 1, r);
        }
    }

    if !tiers.medium.is_empty() {
        out.push_str("\n**🟡 中优先级（值得关注）**\n");
        for (i, r) in tiers.medium.iter().take(limit).enumerate() {
            push_medium(&mut out, i + 1, r);
        }
    }

    if tiers.is_empty() {
        out.push_str("\n📭 今日暂无匹配情报，建议关注以下渠道：\n");
        out.push_str("- 直接联系目标城投公司资产管理部\n");
        out.push_str("- 参加产业园区行业沙龙\n");
    }

    out.push_str("\n---\n");
    out.push_str("💡 **建议行动**：\n");
    out.push_str("1. 高优先级项目建议在3个工作日内联系\n");
    out.push_str("2. 话术参考：「看到贵司招标，我有15年园区操盘经验，曾帮3个园区实现从0到1...」\n");
    out.push_str(&format!("3. 需要定制化话术请@{}\n", cfg.contact));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Priority;

    fn rec(i: usize, region: Option<&str>, priority: Priority) -> TenderRecord {
        TenderRecord {
            source: "test".into(),
            title: format!("标题{i}"),
            link: format!("http://h.test/{i}"),
            date: "2025-09-01".into(),
            keywords: vec!["城投".into(), "资产管理".into()],
            region: region.map(String::from),
            priority,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 6).unwrap()
    }

    #[test]
    fn header_carries_the_date() {
        let msg = format_message(&Tiers::default(), date(), &MessageConfig::default());
        assert!(msg.starts_with("🎯 **每日情报推送（2025-09-06）**"));
    }

    #[test]
    fn empty_tiers_suggest_manual_channels() {
        let msg = format_message(&Tiers::default(), date(), &MessageConfig::default());
        assert!(msg.contains("今日暂无匹配情报"));
        assert!(!msg.contains("高优先级（建议立即联系）"));
        assert!(!msg.contains("中优先级"));
        assert!(msg.contains("需要定制化话术请@AoKen"));
    }

    #[test]
    fn each_tier_is_cut_to_five_silently() {
        let tiers = Tiers {
            high: (0..8).map(|i| rec(i, Some("深圳"), Priority::High)).collect(),
            medium: (100..107).map(|i| rec(i, None, Priority::Medium)).collect(),
        };
        let msg = format_message(&tiers, date(), &MessageConfig::default());
        assert!(msg.contains("**标题4**"));
        assert!(!msg.contains("标题5"));
        assert!(msg.contains("标题104"));
        assert!(!msg.contains("标题105"));
        assert_eq!(msg.matches("查看详情").count(), 10);
        assert!(!msg.contains("more"));
        assert!(!msg.contains("今日暂无匹配情报"));
    }

    #[test]
    fn high_entry_lists_keywords_medium_falls_back_to_unknown_region() {
        let tiers = Tiers {
            high: vec![rec(1, Some("深圳"), Priority::High)],
            medium: vec![rec(2, None, Priority::Medium)],
        };
        let msg = format_message(&tiers, date(), &MessageConfig::default());
        assert!(msg.contains("   📍 深圳 | 💰 需点击查看 | 📅 2025-09-01\n"));
        assert!(msg.contains("   🏷️ 关键词：城投, 资产管理\n"));
        assert!(msg.contains("\n1. 标题2\n   📍 未知 | 📅 2025-09-01\n"));
        assert!(msg.contains("   🔗 [查看详情](http://h.test/2)\n"));
    }

    #[test]
    fn limit_and_contact_are_configurable() {
        let cfg = MessageConfig {
            per_tier_limit: 1,
            contact: "ops".into(),
        };
        let tiers = Tiers {
            high: vec![],
            medium: (0..3).map(|i| rec(i, Some("广州"), Priority::Medium)).collect(),
        };
        let msg = format_message(&tiers, date(), &cfg);
        assert_eq!(msg.matches("查看详情").count(), 1);
        assert!(msg.ends_with("3. 需要定制化话术请@ops\n"));
    }
}
