use super::*;

#[test]
fn history_starts_empty() {
    let history = History::new();
    assert!(history.visited().is_empty());
    assert!(history.current().is_none());
}

#[test]
fn history_records_in_order_across_clones() {
    let history = History::new();
    let nav: Arc<dyn Navigator> = Arc::new(history.clone());
    nav.navigate("/profile");
    nav.navigate(HOME_ROUTE);
    assert_eq!(history.visited(), vec!["/profile".to_owned(), "/".to_owned()]);
    assert_eq!(history.current().as_deref(), Some("/"));
}
