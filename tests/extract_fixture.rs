// tests/extract_fixture.rs
use pretty_assertions::assert_eq;
use tender_monitor::analyze::{prioritize, Matcher};
use tender_monitor::config::{ListingSelectors, MonitorConfig};
use tender_monitor::ingest::extract::{extract_listings, CompiledSelectors, ElementError};

const LIST_HTML: &str = include_str!("fixtures/ccgp_list.html");
const ORIGIN: &str = "http://www.ccgp-guangdong.gov.cn";

fn extract() -> tender_monitor::ingest::extract::ExtractReport {
    let sel = CompiledSelectors::compile(&ListingSelectors::default()).unwrap();
    extract_listings(LIST_HTML, "广东省政府采购网", ORIGIN, &sel, 10)
}

#[test]
fn fixture_yields_first_ten_rows_minus_unparseable_ones() {
    let r = extract();
    let titles: Vec<&str> = r.listings.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "深圳产业园招商及资产管理项目",
            "东莞城投项目",
            "普通采购公告",
            "深圳市园区运营服务采购",
            "广州深圳两地招商引资及产业服务外包",
            "珠海城投资产管理咨询",
            "佛山 城投 平台 资产管理 服务",
            "办公家具采购",
        ]
    );
    assert_eq!(r.skipped, vec![ElementError::EmptyTitle { index: 4 }]);
    assert!(r.listings.iter().all(|l| l.source == "广东省政府采购网"));
}

#[test]
fn links_are_absolute_and_dates_optional() {
    let r = extract();
    assert_eq!(
        r.listings[0].link,
        "http://www.ccgp-guangdong.gov.cn/showNotice/id/40288ba9.html"
    );
    assert_eq!(r.listings[0].date, "2025-09-05");
    // absolute link from another host passes through
    assert_eq!(r.listings[3].link, "https://www.szggzy.com/jyxx/notice/991.html");
    // anchor without href falls back to the site origin
    assert_eq!(r.listings[5].title, "珠海城投资产管理咨询");
    assert_eq!(r.listings[5].link, ORIGIN);
    // relative without leading slash
    assert_eq!(
        r.listings[6].link,
        "http://www.ccgp-guangdong.gov.cn/showNotice/id/40288bb7.html"
    );
    assert_eq!(r.listings[6].date, "");
    assert!(r.listings.iter().all(|l| l.link.starts_with("http")));
}

#[test]
fn fixture_through_matcher_and_prioritizer() {
    let cfg = MonitorConfig::default();
    let m = Matcher::from_config(&cfg);
    let tiers = prioritize(m.match_all(extract().listings), &cfg.primary_region);

    let high: Vec<(&str, Vec<&str>)> = tiers
        .high
        .iter()
        .map(|r| (r.title.as_str(), r.keywords.iter().map(String::as_str).collect()))
        .collect();
    assert_eq!(
        high,
        vec![
            ("深圳产业园招商及资产管理项目", vec!["资产管理", "产业园招商"]),
            ("广州深圳两地招商引资及产业服务外包", vec!["产业服务", "招商引资"]),
        ]
    );
    // configured region order decides, not title order
    assert_eq!(tiers.high[1].region.as_deref(), Some("深圳"));

    let medium: Vec<&str> = tiers.medium.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        medium,
        vec![
            "东莞城投项目",
            "深圳市园区运营服务采购",
            "珠海城投资产管理咨询",
            "佛山 城投 平台 资产管理 服务",
        ]
    );
    assert_eq!(tiers.medium[3].keywords, vec!["资产管理".to_string(), "城投".to_string()]);
}

#[test]
fn matching_listing_without_href_is_still_reported() {
    let cfg = MonitorConfig::default();
    let m = Matcher::from_config(&cfg);
    let tiers = prioritize(m.match_all(extract().listings), &cfg.primary_region);

    let zhuhai = tiers
        .medium
        .iter()
        .find(|r| r.title == "珠海城投资产管理咨询")
        .expect("listing without href dropped");
    assert_eq!(zhuhai.link, ORIGIN);
    assert_eq!(zhuhai.region.as_deref(), Some("珠海"));
    assert_eq!(zhuhai.keywords, vec!["资产管理".to_string(), "城投".to_string()]);
}
