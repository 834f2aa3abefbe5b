use scraper::{ElementRef, Html};

use crate::static_selector;

// The portal answers a rejected login by serving its public login page,
// which is the only page wrapped in this container.
static_selector!(LOGIN_MARKER_SELECTOR <- "div.login-background");

pub fn is_login_page(html: &str) -> bool {
    let document = Html::parse_document(html);
    has_login_marker(document.root_element())
}

pub fn has_login_marker(element: ElementRef) -> bool {
    element.select(&LOGIN_MARKER_SELECTOR).next().is_some()
}
