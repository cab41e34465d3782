// ABOUTME: Fixed audit texts and selector bounds
// ABOUTME: Default template and observations, follow-up question lists, token range

use std::ops::RangeInclusive;

use crate::types::Language;

/// Range the max-output-token selector allows
pub const MAX_TOKENS_RANGE: RangeInclusive<u32> = 1000..=32000;

/// Increment the max-output-token selector moves by
pub const MAX_TOKENS_STEP: u32 = 1000;

/// Report template pre-filled on first load
pub const DEFAULT_TEMPLATE: &str = r#"
# Audit Report / 稽核報告

## 1. Scope / 範圍
[Description of audit scope]

## 2. Observations / 觀察事項
| ID | Type | Description | Clause |
|----|------|-------------|--------|
| 01 | NC   | [Detail]    | 8.2.1  |

## 3. Conclusion / 結論
[Summary of findings]
"#;

/// Observations pre-filled on first load
pub const DEFAULT_OBSERVATIONS: &str = r#"
- Observed missing signature on batch record #B-123.
- Temperature log for warehouse shows excursion on 2023-10-15.
- Training matrix does not include new version of SOP-QA-005.
"#;

const FOLLOW_UP_QUESTIONS_EN: [&str; 20] = [
    "How does the identified non-conformity impact patient safety directly?",
    "What is the root cause analysis method used for this observation?",
    "Can you trace this batch record back to the raw material supplier?",
    "Is this a systemic issue or an isolated incident?",
    "How does this finding align with ISO 13485:2016 Clause 7.3?",
    "What preventative actions are proposed to avoid recurrence?",
    "Has this risk been captured in the Risk Management File (ISO 14971)?",
    "Are the personnel training records up to date for this procedure?",
    "When was the last internal audit conducted on this subsystem?",
    "Does the CAPA plan include a realistic timeline for closure?",
    "How will the effectiveness of the corrective action be verified?",
    "Are there similar gaps in other product lines?",
    "Does this affect the current CE marking validity?",
    "What statistical techniques were used to validate this process?",
    "Is the software validation documentation complete (IEC 62304)?",
    "How are suppliers monitored for performance quality?",
    "Was the environmental monitoring data within limits during production?",
    "Are the sterilization validation reports current?",
    "How is customer feedback integrated into the post-market surveillance?",
    "What is the financial impact of this quality gap?",
];

const FOLLOW_UP_QUESTIONS_ZH: [&str; 20] = [
    "此不符合事項如何直接影響病患安全？",
    "針對此觀察事項使用了何種根本原因分析方法？",
    "能否將此批次記錄追溯至原材料供應商？",
    "這是系統性問題還是單一偶發事件？",
    "此發現如何對應 ISO 13485:2016 第 7.3 條款？",
    "提出了哪些預防措施以避免再次發生？",
    "此風險是否已記錄在風險管理檔案 (ISO 14971) 中？",
    "執行此程序的人員培訓記錄是否為最新？",
    "上次針對此子系統進行內部稽核是什麼時候？",
    "CAPA 計畫是否包含合理的結案時間表？",
    "將如何驗證矯正措施的有效性？",
    "其他產品線是否存在類似缺口？",
    "這是否影響目前的 CE 標誌有效性？",
    "使用了哪些統計技術來驗證此過程？",
    "軟體驗證文件是否完整 (IEC 62304)？",
    "如何監控供應商的績效品質？",
    "生產期間的環境監測數據是否在限值內？",
    "滅菌驗證報告是否為最新版本？",
    "客戶反饋如何整合到上市後監督中？",
    "此品質缺口的財務影響為何？",
];

/// Follow-up questions an auditor may ask about the report, in the given language
pub fn follow_up_questions(lang: Language) -> &'static [&'static str] {
    match lang {
        Language::En => &FOLLOW_UP_QUESTIONS_EN,
        Language::Zh => &FOLLOW_UP_QUESTIONS_ZH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_lists_align() {
        let en = follow_up_questions(Language::En);
        let zh = follow_up_questions(Language::Zh);
        assert_eq!(en.len(), 20);
        assert_eq!(en.len(), zh.len());
        assert!(en[0].contains("patient safety"));
        assert!(zh.iter().all(|q| !q.is_ascii()));
    }

    #[test]
    fn test_default_template_has_heading() {
        assert!(DEFAULT_TEMPLATE.contains("# Audit Report"));
        assert!(DEFAULT_OBSERVATIONS.contains("#B-123"));
    }

    #[test]
    fn test_max_tokens_range_is_step_aligned() {
        assert_eq!(MAX_TOKENS_RANGE.start() % MAX_TOKENS_STEP, 0);
        assert_eq!(MAX_TOKENS_RANGE.end() % MAX_TOKENS_STEP, 0);
    }
}
