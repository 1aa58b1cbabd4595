/// Focus the element with `id` and move the caret to the end of its value.
pub(super) fn focus_input_script(id: &str) -> String {
    format!(
        r#"(function() {{
                    const el = document.getElementById({id:?});
                    if (!el) {{
                        return;
                    }}
                    el.focus();
                    if (typeof el.setSelectionRange === "function") {{
                        const end = el.value.length;
                        el.setSelectionRange(end, end);
                    }}
                }})();"#
    )
}
