//! JavaScript evaluation scripts
//!
//! The JS evaluated in the page to measure content, inventory form
//! elements, and perform text-based clicks. Scripts return plain JSON
//! shapes matching the serde structs in `page_info.rs`.

/// Measure content height against the viewport for the intelligent-zoom
/// calculation.
pub const PAGE_METRICS_SCRIPT: &str = r"
    (() => {
        const body = document.body;
        const html = document.documentElement;
        return {
            content_height: Math.max(
                body?.scrollHeight || 0, body?.offsetHeight || 0,
                html.scrollHeight, html.offsetHeight
            ),
            viewport_height: window.innerHeight,
            viewport_width: window.innerWidth
        };
    })()
";

/// Inventory of interactive form elements.
///
/// Filters obvious non-form chrome (chat widgets, feedback popovers) and
/// caps select options at 10. Visibility combines computed style with
/// layout participation so hidden radios report `visible: false` and the
/// discovery heuristics can route them to `javascript_click`.
pub const FORM_INVENTORY_SCRIPT: &str = r#"
    (() => {
        const CHROME_PATTERNS = /chat|intercom|drift|zendesk|feedback|survey|cookie|consent|qualtrics/i;

        const isChrome = (el) => {
            for (let node = el; node && node !== document.body; node = node.parentElement) {
                const marker = (node.id || '') + ' ' + (node.className?.baseVal ?? node.className ?? '');
                if (CHROME_PATTERNS.test(marker)) return true;
            }
            return false;
        };

        const isVisible = (el) => {
            const style = window.getComputedStyle(el);
            if (style.display === 'none' || style.visibility === 'hidden' || style.opacity === '0') {
                return false;
            }
            return el.offsetParent !== null || style.position === 'fixed';
        };

        const labelFor = (el) => {
            if (el.id) {
                const lbl = document.querySelector(`label[for="${CSS.escape(el.id)}"]`);
                if (lbl) return lbl.textContent.trim();
            }
            const wrapping = el.closest('label');
            if (wrapping) return wrapping.textContent.trim();
            return el.getAttribute('aria-label') || null;
        };

        const inputs = Array.from(document.querySelectorAll('input'))
            .filter(el => !isChrome(el) && el.type !== 'hidden')
            .map(el => ({
                input_type: el.type || 'text',
                id: el.id || null,
                name: el.name || null,
                label: labelFor(el),
                visible: isVisible(el),
                value: el.value || null,
                class_attr: el.className || null
            }));

        const selects = Array.from(document.querySelectorAll('select'))
            .filter(el => !isChrome(el))
            .map(el => ({
                id: el.id || null,
                name: el.name || null,
                label: labelFor(el),
                visible: isVisible(el),
                option_count: el.options.length,
                options: Array.from(el.options).slice(0, 10).map(opt => ({
                    value: opt.value,
                    text: opt.textContent.trim()
                }))
            }));

        const textareas = Array.from(document.querySelectorAll('textarea'))
            .filter(el => !isChrome(el))
            .map(el => ({
                id: el.id || null,
                name: el.name || null,
                label: labelFor(el),
                visible: isVisible(el)
            }));

        const buttons = Array.from(document.querySelectorAll(
                'button, input[type="submit"], input[type="button"], a[role="button"], [role="button"]'))
            .filter(el => !isChrome(el))
            .map(el => ({
                text: (el.textContent || el.value || '').trim() || null,
                id: el.id || null,
                button_type: el.getAttribute('type') || null,
                visible: isVisible(el)
            }));

        return {
            url: window.location.href,
            title: document.title,
            inputs,
            selects,
            textareas,
            buttons
        };
    })()
"#;

/// Click the first clickable element whose visible text matches exactly.
/// The text placeholder is substituted with a JSON-escaped string.
pub fn click_by_text_script(text: &str) -> String {
    let escaped = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
    (() => {{
        const wanted = {escaped};
        const candidates = document.querySelectorAll(
            'a, button, input[type="submit"], input[type="button"], label, [role="button"]');
        for (const el of candidates) {{
            const text = (el.textContent || el.value || '').trim();
            if (text === wanted) {{
                el.click();
                return true;
            }}
        }}
        return false;
    }})()
    "#
    )
}

/// Collect visible text from elements matching the page-level error
/// selectors after a continue click.
pub fn visible_errors_script(selectors: &[String]) -> String {
    let joined = selectors.join(", ");
    let escaped = serde_json::to_string(&joined).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
    (() => {{
        const selector = {escaped};
        if (!selector) return [];
        let matches;
        try {{
            matches = document.querySelectorAll(selector);
        }} catch (e) {{
            return [];
        }}
        const messages = [];
        for (const el of matches) {{
            const style = window.getComputedStyle(el);
            if (style.display === 'none' || style.visibility === 'hidden') continue;
            const text = el.textContent.trim();
            if (text) messages.push(text);
        }}
        return messages;
    }})()
    "#
    )
}

/// Visible text of the results region for the default extractor.
pub fn region_text_script(selector: &str) -> String {
    let escaped = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
    (() => {{
        const selector = {escaped};
        const region = document.querySelector(selector) || document.body;
        return region.innerText.trim();
    }})()
    "#
    )
}
