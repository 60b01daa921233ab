mod support;

use domain::{ForwardingRule, ForwardingScript};
use fwd_console::{RuleBrowser, ScriptBrowser};
use std::sync::Arc;
use support::FakeApi;

fn rule(id: &str, name: &str, enabled: i32) -> ForwardingRule {
    ForwardingRule {
        id: Some(id.to_string()),
        name: name.to_string(),
        enabled: Some(enabled),
        ..ForwardingRule::default()
    }
}

#[tokio::test]
async fn refresh_passes_pagination_and_filters() {
    let api = Arc::new(FakeApi::new());
    let mut browser = RuleBrowser::new(api.clone(), 20);
    browser.name_filter = Some("温度".to_string());
    browser.enabled_filter = Some(1);
    browser.goto_page(3).await.expect("refresh");

    let query = api.last_rule_query().expect("query");
    assert_eq!(query.page, 3);
    assert_eq!(query.page_size, 20);
    assert_eq!(query.name.as_deref(), Some("温度"));
    assert_eq!(query.enabled, Some(1));
}

#[tokio::test]
async fn toggle_issues_one_status_call_with_opposite_value() {
    let api = Arc::new(FakeApi::new());
    api.insert_rule(rule("rule-1", "r", 1));
    let mut browser = RuleBrowser::new(api.clone(), 10);
    browser.refresh().await.expect("refresh");
    assert!(browser.rows[0].is_enabled());

    browser.toggle_enabled(0).await.expect("toggle");
    assert_eq!(api.call_count("set_rule_status"), 1);
    // 展示状态翻转，服务端也写入了反值
    assert!(!browser.rows[0].is_enabled());
    assert_eq!(api.rule("rule-1").expect("rule").enabled, Some(0));
}

#[tokio::test]
async fn failed_toggle_leaves_display_state_unchanged() {
    let api = Arc::new(FakeApi::new());
    api.insert_rule(rule("rule-1", "r", 1));
    let mut browser = RuleBrowser::new(api.clone(), 10);
    browser.refresh().await.expect("refresh");

    api.fail("set_rule_status");
    assert!(browser.toggle_enabled(0).await.is_err());
    assert_eq!(api.call_count("set_rule_status"), 1);
    assert!(browser.rows[0].is_enabled());
}

#[tokio::test]
async fn delete_rule_triggers_one_delete_then_one_refresh() {
    let api = Arc::new(FakeApi::new());
    api.insert_rule(rule("rule-1", "r", 1));
    let mut browser = RuleBrowser::new(api.clone(), 10);
    browser.refresh().await.expect("refresh");
    assert_eq!(browser.rows.len(), 1);

    browser.delete("rule-1").await.expect("delete");
    assert_eq!(api.call_count("delete_rule"), 1);
    // 初始 refresh 一次 + 删除后恰好一次
    assert_eq!(api.call_count("list_rules"), 2);
    assert!(browser.rows.is_empty());
    assert_eq!(browser.total, 0);
}

#[tokio::test]
async fn failed_delete_skips_refresh() {
    let api = Arc::new(FakeApi::new());
    api.insert_rule(rule("rule-1", "r", 1));
    let mut browser = RuleBrowser::new(api.clone(), 10);
    browser.refresh().await.expect("refresh");

    api.fail("delete_rule");
    assert!(browser.delete("rule-1").await.is_err());
    assert_eq!(api.call_count("delete_rule"), 1);
    assert_eq!(api.call_count("list_rules"), 1);
    assert_eq!(browser.rows.len(), 1);
}

#[tokio::test]
async fn script_browser_delete_then_refresh_only_on_success() {
    let api = Arc::new(FakeApi::new());
    api.insert_script(ForwardingScript {
        id: Some("script-1".to_string()),
        name: "清洗".to_string(),
        script_content: "function transform(payload) { return payload; }".to_string(),
        ..ForwardingScript::default()
    });
    let mut browser = ScriptBrowser::new(api.clone(), 10);
    browser.name_filter = Some("清".to_string());
    browser.refresh().await.expect("refresh");
    assert_eq!(
        api.last_script_query().expect("query").name.as_deref(),
        Some("清")
    );
    assert_eq!(browser.rows.len(), 1);

    browser.delete("script-1").await.expect("delete");
    assert_eq!(api.call_count("delete_script"), 1);
    assert_eq!(api.call_count("list_scripts"), 2);
    assert!(browser.rows.is_empty());

    api.fail("delete_script");
    assert!(browser.delete("script-x").await.is_err());
    assert_eq!(api.call_count("list_scripts"), 2);
}
