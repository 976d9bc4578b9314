use web_sys as web;

// Element ids owned by www/index.html. The intro only ever toggles
// visibility and the loading bar; the content inside #main-content is
// plain markup it never reads.

/// Drive the loading bar from the Initial stage's progress fraction.
pub fn set_loading_progress(document: &web::Document, fraction: f32) {
    let pct = (fraction.clamp(0.0, 1.0) * 100.0).round();
    if let Some(el) = document.get_element_by_id("loading-bar") {
        _ = el.set_attribute("style", &format!("width:{}%", pct));
    }
    if let Some(el) = document.get_element_by_id("loading-label") {
        el.set_text_content(Some(&format!("Loading {}%", pct)));
    }
}

pub fn hide_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("loading-overlay") {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "display:none");
    }
}

/// The content half of the handoff: hide whatever intro chrome remains
/// and reveal the main page. Safe to call more than once; the frame
/// loop guarantees it runs once.
pub fn reveal_main_content(document: &web::Document) {
    hide_loading(document);
    if let Some(el) = document.get_element_by_id("main-content") {
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        _ = el.set_attribute("style", "");
    }
}
