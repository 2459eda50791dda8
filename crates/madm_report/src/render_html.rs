//! Self-contained HTML report (no external assets). The template name ends in
//! `.html`, so minijinja escapes every interpolated value.

use minijinja::{context, Environment};

use crate::{ReportError, ReportModel};

static TEMPLATE: &str = r#"<!doctype html>
<html lang="en"><meta charset="utf-8">
<title>{{ r.cover.title }} ({{ r.cover.method }})</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; margin: .5rem 0 1rem; }
td, th { border: 1px solid #999; padding: .2rem .5rem; text-align: right; }
th { background: #eee; }
.bad { color: #a00; }
</style>
<h1>{{ r.cover.title }}</h1>
<p><strong>Method:</strong> {{ r.cover.method_name }} ({{ r.cover.method }})
{% if r.cover.best %}<br><strong>Best alternative:</strong> {{ r.cover.best }}{% endif %}</p>

<h2>Criteria</h2>
<table>
<tr><th>Id</th><th>Name</th><th>Weight</th><th>Type</th></tr>
{% for c in r.criteria %}<tr><td>{{ c.id }}</td><td>{{ c.name }}</td><td>{{ c.weight }}</td><td>{{ c.kind }}</td></tr>
{% endfor %}</table>

<h2>Ranking</h2>
<table>
<tr><th>Rank</th><th>Alternative</th><th>Score</th></tr>
{% for row in r.ranking %}<tr><td>{{ row.rank }}</td><td>{{ row.name }}</td><td>{{ row.score }}</td></tr>
{% endfor %}</table>

<h2>Calculation Steps</h2>
{% for s in r.steps %}
<h3>{{ s.number }}. {{ s.title }}</h3>
<p>{{ s.description }}</p>
{% if s.matrix %}<table>
{% if s.headers %}<tr><th></th>{% for h in s.headers %}<th>{{ h }}</th>{% endfor %}</tr>{% endif %}
{% for row in s.matrix %}<tr><th>{{ loop.index }}</th>{% for cell in row %}<td>{{ cell }}</td>{% endfor %}</tr>
{% endfor %}</table>{% endif %}
{% if s.vector %}<table><tr>{% for v in s.vector %}<td>{{ v }}</td>{% endfor %}</tr></table>{% endif %}
{% if s.formulas %}<ul>{% for f in s.formulas %}<li><code>{{ f }}</code></li>{% endfor %}</ul>{% endif %}
{% endfor %}

{% if r.consistency %}
<h2>Consistency</h2>
<table>
<tr><th>Matrix</th><th>&lambda;max</th><th>CI</th><th>RI</th><th>CR</th><th>Consistent</th></tr>
{% macro row(c) %}<tr><td>{{ c.label }}</td><td>{{ c.lambda_max }}</td><td>{{ c.ci }}</td><td>{{ c.ri }}</td><td>{{ c.cr }}</td><td{% if not c.consistent %} class="bad"{% endif %}>{{ "yes" if c.consistent else "no" }}</td></tr>{% endmacro %}
{{ row(r.consistency.criteria) }}
{% for c in r.consistency.local %}{{ row(c) }}
{% endfor %}</table>
{% endif %}

{% if r.notes %}
<h2>Notes</h2>
<ul>{% for n in r.notes %}<li>{{ n }}</li>{% endfor %}</ul>
{% endif %}

<h2>Integrity</h2>
<p>Result: <code>{{ r.integrity.result_id }}</code><br>
Input SHA-256: <code>{{ r.integrity.input_sha256 }}</code><br>
Engine: madm v{{ r.integrity.engine_version }}</p>
<p>{% for kv in r.integrity.params %}{{ kv[0] }}={{ kv[1] }}{% if not loop.last %}, {% endif %}{% endfor %}</p>
</html>
"#;

pub fn render_html(model: &ReportModel) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template("report.html", TEMPLATE)
        .map_err(|e| ReportError::Template(format!("add_template: {e}")))?;
    let tmpl = env
        .get_template("report.html")
        .map_err(|e| ReportError::Template(format!("get_template: {e}")))?;
    tmpl.render(context! { r => model })
        .map_err(|e| ReportError::Template(format!("render_html: {e}")))
}
