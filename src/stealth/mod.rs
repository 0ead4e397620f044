//! Bot-detection evasions
//!
//! Injects evasion scripts that run on every new document before site
//! code executes. Order matters: the config object must exist before the
//! scripts that read it. Canvas noise is seeded per session so repeated
//! runs don't share a fingerprint.

use chromiumoxide::{Page, cdp};
use tracing::{debug, warn};

use crate::error::WizardError;
use crate::utils::CHROME_USER_AGENT;

const NAVIGATOR_WEBDRIVER_JS: &str = r"
    Object.defineProperty(navigator, 'webdriver', {
        get: () => false
    });
";

const NAVIGATOR_VENDOR_JS: &str = r"
    Object.defineProperty(navigator, 'vendor', {
        get: () => 'Google Inc.'
    });
";

const NAVIGATOR_LANGUAGES_JS: &str = r"
    Object.defineProperty(navigator, 'languages', {
        get: () => ['en-US', 'en']
    });
";

const NAVIGATOR_PLUGINS_JS: &str = r"
    const mockPlugins = [
        {
            name: 'Chrome PDF Plugin',
            description: 'Portable Document Format',
            filename: 'internal-pdf-viewer',
            mimeTypes: [{ type: 'application/pdf', description: 'Portable Document Format' }]
        },
        {
            name: 'Chrome PDF Viewer',
            description: '',
            filename: 'mhjfbmdgcfjbbpaeojofohoefgiehjai',
            mimeTypes: [{ type: 'application/pdf', description: 'Portable Document Format' }]
        },
        {
            name: 'Native Client',
            description: '',
            filename: 'internal-nacl-plugin',
            mimeTypes: []
        }
    ];
    const pluginsProto = Object.getPrototypeOf(navigator.plugins);
    Object.defineProperty(navigator, 'plugins', {
        get: () => {
            const plugins = {};
            mockPlugins.forEach((plugin, i) => {
                plugins[i] = plugin;
                plugins[plugin.name] = plugin;
            });
            Object.setPrototypeOf(plugins, pluginsProto);
            Object.defineProperty(plugins, 'length', { value: mockPlugins.length });
            return plugins;
        }
    });
";

const CHROME_RUNTIME_JS: &str = r"
    if (!window.chrome) {
        window.chrome = {};
    }
    if (!window.chrome.runtime) {
        window.chrome.runtime = {
            connect: () => ({
                onMessage: { addListener: () => {}, removeListener: () => {} },
                postMessage: () => {}
            })
        };
    }
";

const WEBGL_VENDOR_JS: &str = r"
    const getParameterProxyHandler = {
        apply: function(target, ctx, args) {
            const param = (args && args[0]) || null;
            // UNMASKED_VENDOR_WEBGL
            if (param === 37445) {
                return 'Intel Inc.';
            }
            // UNMASKED_RENDERER_WEBGL
            if (param === 37446) {
                return 'Intel Iris OpenGL Engine';
            }
            return Reflect.apply(target, ctx, args);
        }
    };
    if (window.WebGLRenderingContext) {
        const getParameter = WebGLRenderingContext.prototype.getParameter;
        WebGLRenderingContext.prototype.getParameter = new Proxy(getParameter, getParameterProxyHandler);
    }
";

/// Deterministic per-session canvas noise keyed on `sessionSeed`.
const CANVAS_NOISE_JS: &str = r"
    (() => {
        const seed = window.__fwSessionSeed || '00';
        let h = 0;
        for (const c of seed) { h = (h * 31 + c.charCodeAt(0)) | 0; }
        const offset = (h % 7) - 3;
        const original = HTMLCanvasElement.prototype.toDataURL;
        HTMLCanvasElement.prototype.toDataURL = function(...args) {
            const ctx = this.getContext('2d');
            if (ctx && this.width > 0 && this.height > 0) {
                try {
                    const image = ctx.getImageData(0, 0, 1, 1);
                    image.data[0] = Math.max(0, Math.min(255, image.data[0] + offset));
                    ctx.putImageData(image, 0, 0);
                } catch (e) { /* tainted canvas */ }
            }
            return original.apply(this, args);
        };
    })();
";

/// Register all evasion scripts to run on every new document.
///
/// Must be called on a blank page before the first real navigation;
/// scripts registered afterwards only affect subsequent documents.
pub async fn inject(page: &Page) -> Result<(), WizardError> {
    let session_seed: Vec<u8> = (0..16).map(|_| rand::random::<u8>()).collect();
    let seed_script = format!(
        "window.__fwSessionSeed = '{}';",
        hex::encode(&session_seed)
    );

    let user_agent_js = format!(
        r"
        Object.defineProperty(navigator, 'userAgent', {{
            value: '{CHROME_USER_AGENT}'
        }});
    "
    );

    let scripts: Vec<(&str, String)> = vec![
        ("session_seed", seed_script),
        ("navigator_webdriver", NAVIGATOR_WEBDRIVER_JS.to_string()),
        ("navigator_vendor", NAVIGATOR_VENDOR_JS.to_string()),
        ("user_agent", user_agent_js),
        ("navigator_languages", NAVIGATOR_LANGUAGES_JS.to_string()),
        ("navigator_plugins", NAVIGATOR_PLUGINS_JS.to_string()),
        ("chrome_runtime", CHROME_RUNTIME_JS.to_string()),
        ("webgl_vendor", WEBGL_VENDOR_JS.to_string()),
        ("canvas_noise", CANVAS_NOISE_JS.to_string()),
    ];

    debug!("Injecting {} stealth scripts", scripts.len());

    let mut failed = 0usize;
    for (name, source) in scripts {
        let result = page
            .execute(
                cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams {
                    source,
                    include_command_line_api: None,
                    world_name: None,
                    run_immediately: None,
                },
            )
            .await;
        match result {
            Ok(_) => debug!("injected stealth script: {name}"),
            Err(e) => {
                // Best-effort: a missing evasion degrades stealth, it
                // doesn't break automation.
                warn!("failed to inject stealth script {name}: {e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        warn!("{failed} stealth scripts failed to inject");
    }
    Ok(())
}
