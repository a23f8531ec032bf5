use consentnet::consent::{ConsentStore, ConsentUpdate, CookiePurger, MemoryStorage, PurgeReport};
use consentnet::inventory::{CookieInventory, MemoryCookieJar};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_update_with_purge_removes_declined_cookies() {
    let jar = MemoryCookieJar::with_names(&["cf_ob_info", "cf_use_ob", "__cfwaitingroom"]);
    let inventory = CookieInventory::new(Box::new(jar));

    let mut store = ConsentStore::new(Box::new(MemoryStorage::new()), inventory)
        .with_purger(CookiePurger::new());
    store.load();

    // Decline performance, keep functional.
    store.update(ConsentUpdate {
        performance: Some(false),
        functional: Some(true),
    });

    let inv = store.inventory();
    assert!(!inv.has_cookie("cf_ob_info"));
    assert!(!inv.has_cookie("cf_use_ob"));
    assert!(inv.has_cookie("__cfwaitingroom"));
}

#[test]
fn test_purge_report_delivered_to_observers() {
    let jar = MemoryCookieJar::with_names(&["__cf_bm", "cf_ob_info"]);
    // Simulate the server-set waiting-room cookie the client cannot touch.
    jar.set_protected("__cfwaitingroom", "opaque");
    let inventory = CookieInventory::new(Box::new(jar));

    let mut store = ConsentStore::new(Box::new(MemoryStorage::new()), inventory)
        .with_purger(CookiePurger::with_domain("example.com"));
    store.load();

    let reports: Rc<RefCell<Vec<PurgeReport>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reports);
    store.subscribe(move |event| {
        if let Some(report) = &event.purge {
            sink.borrow_mut().push(report.clone());
        }
    });

    store.update(ConsentUpdate::necessary_only());

    let reports = reports.borrow();
    assert_eq!(reports.len(), 1);
    let report = &reports[0];

    assert_eq!(report.attempted, vec!["cf_ob_info", "__cfwaitingroom"]);
    assert_eq!(report.verified, vec!["cf_ob_info"]);
    // HttpOnly-like cookie survives the overwrite and is reported, not raised.
    assert_eq!(report.failed, vec!["__cfwaitingroom"]);
    assert_eq!(report.protected, vec!["__cf_bm"]);
    assert!(!report.is_clean());
}

#[test]
fn test_accepting_all_purges_nothing() {
    let jar = MemoryCookieJar::with_names(&["cf_ob_info", "__cfseq"]);
    let inventory = CookieInventory::new(Box::new(jar));

    let mut store = ConsentStore::new(Box::new(MemoryStorage::new()), inventory)
        .with_purger(CookiePurger::new());
    store.load();

    let reports: Rc<RefCell<Vec<PurgeReport>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reports);
    store.subscribe(move |event| {
        if let Some(report) = &event.purge {
            sink.borrow_mut().push(report.clone());
        }
    });

    store.update(ConsentUpdate::accept_all());

    let reports = reports.borrow();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].attempted.is_empty());
    assert!(store.inventory().has_cookie("cf_ob_info"));
    assert!(store.inventory().has_cookie("__cfseq"));
}

#[test]
fn test_store_without_purger_reports_none() {
    let jar = MemoryCookieJar::with_names(&["cf_ob_info"]);
    let inventory = CookieInventory::new(Box::new(jar));

    let mut store = ConsentStore::new(Box::new(MemoryStorage::new()), inventory);
    store.load();

    let saw_purge = Rc::new(RefCell::new(false));
    let sink = Rc::clone(&saw_purge);
    store.subscribe(move |event| {
        *sink.borrow_mut() = event.purge.is_some();
    });

    store.update(ConsentUpdate::necessary_only());
    assert!(!*saw_purge.borrow());
    // No purger: the declined cookie stays until the server stops setting it.
    assert!(store.inventory().has_cookie("cf_ob_info"));
}
