use std::fs;
use std::path::Path;

pub const BLOG_URL: &str = "http://example.blogspot.com/";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Load test HTML fixture by name
pub fn load_html_fixture(fixture_name: &str) -> String {
    let path = Path::new("src/tests/fixtures").join(format!("{}.html", fixture_name));
    fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {}", fixture_name))
}

/// Load a captured failure page for regression testing
pub fn load_failure_html(failure_name: &str) -> Option<String> {
    let path = Path::new("src/tests/fixtures/failures").join(format!("{}.html", failure_name));
    fs::read_to_string(path).ok()
}

pub fn post_url(year: i32, month: u32, slug: &str) -> String {
    format!("{}{}/{:02}/{}.html", BLOG_URL, year, month, slug)
}

/// Archive page whose widget lists one post per given month of `year`.
pub fn archive_page(year: i32, posts: &[(u32, &str)]) -> String {
    let mut months = String::new();
    for (month, slug) in posts {
        months.push_str(&format!(
            r#"<li class="archivedate">
<a class="post-count-link" href="{blog}{year}/{month:02}/">{name}</a>
<ul class="posts"><li><a href="{url}">{slug}</a></li></ul>
</li>
"#,
            blog = BLOG_URL,
            year = year,
            month = month,
            name = MONTH_NAMES[(*month - 1) as usize],
            url = post_url(year, *month, slug),
            slug = slug,
        ));
    }

    format!(
        r#"<html><body>
<div id="BlogArchive1_ArchiveList">
<ul class="hierarchy">
<li class="archivedate expanded">
<a class="post-count-link" href="{blog}{year}/">{year}</a>
<ul class="hierarchy">
{months}</ul>
</li>
</ul>
</div>
</body></html>"#,
        blog = BLOG_URL,
        year = year,
        months = months,
    )
}

/// Post page dated `date_header` with the given title, paragraphs and image
/// sources.
pub fn post_page(date_header: &str, title: &str, paragraphs: &[&str], images: &[&str]) -> String {
    let mut body = String::new();
    for paragraph in paragraphs {
        body.push_str(&format!("{}<br />\n", paragraph));
    }
    for src in images {
        body.push_str(&format!(
            "<div class=\"separator\"><img src=\"{}\" /></div>\n",
            src
        ));
    }

    format!(
        r#"<html><body>
<h2 class="date-header"><span>{date_header}</span></h2>
<div class="post hentry">
<h3 class="post-title entry-title">{title}</h3>
<div class="post-body entry-content">
{body}</div>
</div>
</body></html>"#,
        date_header = date_header,
        title = title,
        body = body,
    )
}
