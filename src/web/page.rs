//! The Mini App page.
//!
//! A single server-rendered view: greeting, status form, latest list. All
//! state lives in the page; the embedded script talks to the API on the same
//! origin, so the page itself needs no CORS exemption.

use axum::response::Html;

/// GET / — serves the Mini App HTML.
pub async fn miniapp_page() -> Html<&'static str> {
    Html(MINIAPP_HTML)
}

const MINIAPP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Status Board</title>
<script src="https://telegram.org/js/telegram-web-app.js"></script>
<style>
*{box-sizing:border-box;margin:0;padding:0}
body{background:#f9fafb;min-height:100vh;display:flex;justify-content:center;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;padding:20px}
.card{background:#fff;border-radius:12px;box-shadow:0 2px 12px rgba(0,0,0,.08);padding:24px;max-width:480px;width:100%}
h2{color:#1d4ed8;font-size:1.5rem;text-align:center;margin-bottom:20px}
textarea{width:100%;padding:14px;border:1px solid #93c5fd;border-radius:8px;resize:none;font-size:1rem;color:#1e3a8a;margin-bottom:16px}
textarea:focus{outline:none;box-shadow:0 0 0 3px rgba(96,165,250,.4)}
button{width:100%;padding:12px;border:0;border-radius:8px;background:#2563eb;color:#fff;font-weight:600;font-size:1rem;cursor:pointer}
button:disabled{background:#93c5fd;cursor:default}
.banner{margin-top:16px;padding:10px;border-radius:8px;text-align:center;font-weight:600}
.banner.error{background:#fee2e2;color:#b91c1c}
.banner.success{background:#dcfce7;color:#15803d}
.latest{margin-top:24px}
.latest h3{font-size:1rem;color:#374151;margin-bottom:8px}
.latest ul{list-style:none}
.latest li{padding:8px 0;border-bottom:1px solid #e5e7eb;color:#111827;font-size:.95rem}
.latest li b{color:#1d4ed8}
.latest .empty{color:#9ca3af;font-size:.9rem}
</style>
</head>
<body>
<div class="card">
<h2>Hello, <span id="user-name">User</span>! &#128075;</h2>
<form id="status-form">
<textarea id="status-text" rows="6" placeholder="What's on your mind today?"></textarea>
<button id="post-btn" type="submit">Post Status</button>
</form>
<div id="banner"></div>
<div class="latest">
<h3>Latest statuses</h3>
<ul id="latest-list"><li class="empty">Loading&hellip;</li></ul>
</div>
</div>
<script>
(function () {
  var webApp = window.Telegram && window.Telegram.WebApp;
  var user = webApp && webApp.initDataUnsafe && webApp.initDataUnsafe.user;
  var bannerTimer = null;

  function showBanner(type, text) {
    var banner = document.getElementById('banner');
    banner.innerHTML = '';
    var el = document.createElement('div');
    el.className = 'banner ' + type;
    el.textContent = text;
    banner.appendChild(el);
    if (bannerTimer) clearTimeout(bannerTimer);
    bannerTimer = setTimeout(function () { banner.innerHTML = ''; }, 3000);
  }

  function escapeHtml(s) {
    return String(s).replace(/&/g, '&amp;').replace(/</g, '&lt;')
      .replace(/>/g, '&gt;').replace(/"/g, '&quot;');
  }

  function refreshLatest() {
    fetch('/latest')
      .then(function (res) { return res.json(); })
      .then(function (list) {
        var ul = document.getElementById('latest-list');
        if (!Array.isArray(list) || list.length === 0) {
          ul.innerHTML = '<li class="empty">No statuses posted yet.</li>';
          return;
        }
        ul.innerHTML = list.map(function (s) {
          return '<li><b>' + escapeHtml(s.name) + ':</b> ' + escapeHtml(s.status) + '</li>';
        }).join('');
      })
      .catch(function () {
        document.getElementById('latest-list').innerHTML =
          '<li class="empty">Could not load statuses.</li>';
      });
  }

  if (user) {
    document.getElementById('user-name').textContent = user.first_name || '';
    webApp.ready();
  } else {
    showBanner('error', 'No user info provided by Telegram.');
  }

  document.getElementById('status-form').addEventListener('submit', function (e) {
    e.preventDefault();
    var textarea = document.getElementById('status-text');
    var button = document.getElementById('post-btn');
    var text = textarea.value.trim();

    if (!text) {
      showBanner('error', 'Status cannot be empty!');
      return;
    }
    if (!user || !user.id) {
      showBanner('error', 'Your userId can not be found, please try again from the Telegram bot.');
      return;
    }

    button.disabled = true;
    button.textContent = 'Posting...';

    fetch('/status', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({
        id: user.id,
        name: document.getElementById('user-name').textContent,
        status: text
      })
    })
      .then(function (res) {
        return res.json().then(function (body) {
          if (!res.ok) throw new Error(body.error || 'Failed to post status');
          showBanner('success', 'Status posted successfully! 🎉');
          textarea.value = '';
          refreshLatest();
        });
      })
      .catch(function (err) {
        showBanner('error', err.message);
      })
      .finally(function () {
        button.disabled = false;
        button.textContent = 'Post Status';
      });
  });

  refreshLatest();
})();
</script>
</body>
</html>
"#;
