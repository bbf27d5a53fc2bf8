use serde_json::Value;

const BOOTSTRAP_PLACEHOLDER: &str = "__ISOVIEW_BOOTSTRAP__";

/// Map page with its bootstrap data (title, centers, map height) inlined.
pub fn index_html(bootstrap: &Value) -> String {
    // `</` would end the script element early; `<\/` is the same JSON string.
    let json = bootstrap.to_string().replace("</", "<\\/");
    INDEX_HTML.replace(BOOTSTRAP_PLACEHOLDER, &json)
}

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">

<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Isochrone Map Viewer</title>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous"
    referrerpolicy="no-referrer" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"
    referrerpolicy="no-referrer"></script>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css"
    crossorigin="anonymous" referrerpolicy="no-referrer" />
  <style>
    body { margin: 0; font-family: system-ui, sans-serif; display: flex; min-height: 100vh; color: #1f2937; }
    #sidebar { width: 280px; padding: 1.25rem; background: #f3f4f6; box-sizing: border-box; }
    #sidebar h2 { font-size: 1.1rem; margin: 0 0 1rem; }
    #sidebar label { display: block; margin: 0.9rem 0 0.3rem; font-weight: 600; }
    #sidebar label.check { font-weight: 400; }
    #sidebar select, #sidebar input[type=range] { width: 100%; }
    main { flex: 1; padding: 1.25rem 2rem; }
    main h1 { margin: 0 0 1rem; font-size: 1.8rem; }
    #map { width: 100%; border-radius: 4px; }
    #error { display: none; margin-bottom: 1rem; padding: 0.75rem 1rem; background: #fee2e2; color: #991b1b; border-radius: 4px; }
    .beacon {
      width: 28px; height: 28px; border: 2px solid; border-radius: 50%;
      display: flex; align-items: center; justify-content: center; font-size: 14px;
      box-sizing: border-box;
    }
    .pin {
      width: 26px; height: 26px; border-radius: 50% 50% 50% 0; transform: rotate(-45deg);
      display: flex; align-items: center; justify-content: center; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.4);
    }
    .pin i { transform: rotate(45deg); color: white; font-size: 12px; }
    .legend { background: rgba(255, 255, 255, 0.9); padding: 6px 10px; border-radius: 4px; font-size: 12px; }
    .legend .bar { width: 220px; height: 10px; margin: 4px 0 2px; }
    .legend .ticks { position: relative; height: 14px; }
    .legend .ticks span { position: absolute; transform: translateX(-50%); }
  </style>
</head>

<body>
  <aside id="sidebar">
    <h2>Filters</h2>
    <label for="center">Select Center</label>
    <select id="center"></select>
    <label for="minutes">Max minutes: <span id="minutes-value"></span></label>
    <input id="minutes" type="range" min="1" max="1" step="1" value="1" />
    <label class="check"><input id="schools" type="checkbox" /> Show Schools</label>
    <label class="check"><input id="hospitals" type="checkbox" /> Show Hospitals</label>
  </aside>
  <main>
    <h1 id="title"></h1>
    <div id="error"></div>
    <div id="map"></div>
  </main>

  <script type="application/json" id="isoview-bootstrap">__ISOVIEW_BOOTSTRAP__</script>
  <script>
    (function () {
      const boot = JSON.parse(document.getElementById('isoview-bootstrap').textContent);
      const centerEl = document.getElementById('center');
      const minutesEl = document.getElementById('minutes');
      const minutesLabel = document.getElementById('minutes-value');
      const schoolsEl = document.getElementById('schools');
      const hospitalsEl = document.getElementById('hospitals');
      const errorEl = document.getElementById('error');

      document.getElementById('title').textContent = boot.title;
      document.getElementById('map').style.height = boot.mapHeight + 'px';
      for (const name of boot.centers) {
        const option = document.createElement('option');
        option.value = name;
        option.textContent = name;
        centerEl.appendChild(option);
      }

      let map = null;
      let drawn = null;
      let legend = null;
      // Viewport reports are chained so a render never overtakes one.
      let pending = Promise.resolve();

      function text(value) {
        const span = document.createElement('span');
        span.textContent = value;
        return span;
      }

      function markerIcon(icon) {
        if (icon.kind === 'beacon') {
          return L.divIcon({
            className: '',
            html: `<div class="beacon" style="background:${icon.background_color};color:${icon.text_color};border-color:${icon.border_color}"><i class="fa-solid fa-${icon.icon}"></i></div>`,
            iconSize: [28, 28],
            iconAnchor: [14, 14],
            popupAnchor: [0, -14]
          });
        }
        return L.divIcon({
          className: '',
          html: `<div class="pin" style="background:${icon.color}"><i class="fa-solid fa-${icon.icon}"></i></div>`,
          iconSize: [26, 26],
          iconAnchor: [13, 30],
          popupAnchor: [0, -28]
        });
      }

      function addMarker(marker) {
        const layer = L.marker([marker.lat, marker.lng], {icon: markerIcon(marker.icon)});
        if (marker.popup) layer.bindPopup(text(marker.popup));
        layer.addTo(drawn);
      }

      function legendControl() {
        const control = L.control({position: 'topright'});
        control.onAdd = function () {
          this._div = L.DomUtil.create('div', 'legend');
          return this._div;
        };
        control.update = function (entry) {
          const span = entry.max - entry.min;
          const ticks = entry.ticks.map((t) => {
            const pos = span > 0 ? ((t - entry.min) / span) * 100 : 0;
            return `<span style="left:${pos}%">${Math.trunc(t)}</span>`;
          }).join('');
          this._div.innerHTML = '';
          this._div.appendChild(text(entry.caption));
          const bar = L.DomUtil.create('div', 'bar', this._div);
          bar.style.background = `linear-gradient(to right, ${entry.colors.join(', ')})`;
          const tickRow = L.DomUtil.create('div', 'ticks', this._div);
          tickRow.innerHTML = ticks;
        };
        return control;
      }

      function reportViewport() {
        const c = map.getCenter().wrap();
        const body = JSON.stringify({center: {lat: c.lat, lng: c.lng}, zoom: map.getZoom()});
        pending = pending
          .then(() => fetch('/api/viewport', {
            method: 'POST',
            headers: {'Content-Type': 'application/json'},
            body
          }))
          .catch(() => {});
      }

      function showError(message) {
        errorEl.textContent = message;
        errorEl.style.display = message ? 'block' : 'none';
      }

      async function render(resetMinutes) {
        const params = new URLSearchParams({
          center: centerEl.value,
          schools: schoolsEl.checked,
          hospitals: hospitalsEl.checked
        });
        if (!resetMinutes) params.set('minutes', minutesEl.value);

        await pending;
        let data;
        try {
          const resp = await fetch('/api/render?' + params.toString());
          if (!resp.ok) {
            const body = await resp.json().catch(() => ({}));
            showError(body.error || resp.statusText);
            return;
          }
          data = await resp.json();
        } catch (err) {
          showError(String(err));
          return;
        }
        showError('');

        minutesEl.max = data.max_minutes;
        minutesEl.value = data.minutes;
        minutesLabel.textContent = data.minutes;

        const view = data.viewport;
        if (!map) {
          map = L.map('map').setView([view.center.lat, view.center.lng], view.zoom);
          L.tileLayer(data.tiles.url, {attribution: data.tiles.attribution, maxZoom: 20}).addTo(map);
          drawn = L.layerGroup().addTo(map);
          legend = legendControl().addTo(map);
          map.on('moveend', reportViewport);
        } else if (data.filters_changed) {
          map.setView([view.center.lat, view.center.lng], view.zoom, {animate: false});
        }

        drawn.clearLayers();
        for (const band of data.isochrones) {
          L.geoJSON({type: 'Feature', properties: {}, geometry: band.geometry}, {style: () => band.style})
            .bindPopup(text(band.label))
            .addTo(drawn);
        }
        addMarker(data.start_marker);
        data.schools.forEach(addMarker);
        data.hospitals.forEach(addMarker);
        legend.update(data.legend);
      }

      minutesEl.addEventListener('input', () => { minutesLabel.textContent = minutesEl.value; });
      minutesEl.addEventListener('change', () => render(false));
      centerEl.addEventListener('change', () => render(true));
      schoolsEl.addEventListener('change', () => render(false));
      hospitalsEl.addEventListener('change', () => render(false));

      if (boot.centers.length > 0) {
        render(true);
      } else {
        showError('No centers configured.');
      }
    })();
  </script>
</body>

</html>
"#;
