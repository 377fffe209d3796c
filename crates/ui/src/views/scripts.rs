/// Trap the browser-style back gesture so a candidate cannot navigate out of
/// a live attempt or back into a submitted one.
pub(crate) fn prevent_back_script() -> String {
    r#"(function() {
        history.pushState(null, "", location.href);
        window.onpopstate = function() {
            history.pushState(null, "", location.href);
        };
    })();"#
        .to_string()
}
