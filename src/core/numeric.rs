use regex::Regex;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::LazyLock;

use super::ports::NumericExtractor;

static ARABIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:,\d{3})*(?:\.\d+)?)\s*(万|亿)?").expect("arabic numeral pattern")
});

static CHINESE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[零〇一二两三四五六七八九十百千万亿]+").expect("chinese numeral pattern"));

/// 默认数值抽取器: 阿拉伯数字 (可带千分位、万/亿后缀) 与中文数字
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexNumericExtractor;

impl NumericExtractor for RegexNumericExtractor {
    fn extract(&self, question: &str) -> Vec<String> {
        let mut found: Vec<(usize, String)> = Vec::new();
        let mut covered: Vec<(usize, usize)> = Vec::new();

        for cap in ARABIC.captures_iter(question) {
            let Some(whole) = cap.get(0) else { continue };
            let digits = cap[1].replace(',', "");
            let value = match cap.get(2).map(|m| m.as_str()) {
                Some(unit) => scale(&digits, unit),
                None => Some(digits),
            };
            if let Some(v) = value {
                found.push((whole.start(), v));
                covered.push((whole.start(), whole.end()));
            }
        }

        for m in CHINESE.find_iter(question) {
            // "5万" 中的 万 已被阿拉伯数字部分消费
            if covered.iter().any(|&(s, e)| m.start() >= s && m.start() < e) {
                continue;
            }
            if let Some(v) = parse_chinese(m.as_str()) {
                found.push((m.start(), v.to_string()));
            }
        }

        found.sort_by_key(|(pos, _)| *pos);
        let mut seen = HashSet::new();
        found
            .into_iter()
            .map(|(_, v)| v)
            .filter(|v| seen.insert(v.clone()))
            .collect()
    }
}

fn scale(digits: &str, unit: &str) -> Option<String> {
    let base = Decimal::from_str(digits).ok()?;
    let factor = match unit {
        "万" => Decimal::from(10_000u64),
        _ => Decimal::from(100_000_000u64),
    };
    Some(base.checked_mul(factor)?.normalize().to_string())
}

fn chinese_digit(c: char) -> Option<u128> {
    Some(match c {
        '零' | '〇' => 0,
        '一' => 1,
        '二' | '两' => 2,
        '三' => 3,
        '四' => 4,
        '五' => 5,
        '六' => 6,
        '七' => 7,
        '八' => 8,
        '九' => 9,
        _ => return None,
    })
}

/// 中文数字转整数; 只有单位没有数字的片段 (如 "万") 或溢出时不算数值
fn parse_chinese(s: &str) -> Option<u128> {
    if !s.chars().any(|c| chinese_digit(c).is_some() || c == '十') {
        return None;
    }
    let (mut total, mut section, mut number) = (0u128, 0u128, 0u128);
    for c in s.chars() {
        if let Some(d) = chinese_digit(c) {
            number = d;
            continue;
        }
        match c {
            '十' | '百' | '千' => {
                let unit = match c {
                    '十' => 10,
                    '百' => 100,
                    _ => 1000,
                };
                if number == 0 && c == '十' {
                    number = 1;
                }
                section = section.checked_add(number.checked_mul(unit)?)?;
                number = 0;
            }
            '万' => {
                let part = section.checked_add(number)?.checked_mul(10_000)?;
                total = total.checked_add(part)?;
                section = 0;
                number = 0;
            }
            '亿' => {
                total = total
                    .checked_add(section)?
                    .checked_add(number)?
                    .checked_mul(100_000_000)?;
                section = 0;
                number = 0;
            }
            _ => {}
        }
    }
    total.checked_add(section)?.checked_add(number)
}
