use rust_embed::RustEmbed;
use tera::Tera;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct TemplateAssets;

/// Builds the tera engine from the templates compiled into the binary.
/// `.html` templates are autoescaped; `.txt` email templates are not.
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    let mut sources = Vec::new();
    for name in TemplateAssets::iter() {
        if let Some(file) = TemplateAssets::get(&name) {
            let source = String::from_utf8_lossy(&file.data).into_owned();
            sources.push((name.to_string(), source));
        }
    }
    tera.add_raw_templates(sources)?;
    Ok(tera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_every_page_template() {
        let tera = load_templates().unwrap();
        let names: Vec<&str> = tera.get_template_names().collect();
        for expected in [
            "base.html",
            "login.html",
            "standups/index.html",
            "standups/form.html",
            "standups/show.html",
            "posts/show.html",
            "posts/index.html",
            "post_email.txt",
        ] {
            assert!(names.contains(&expected), "missing template {expected}");
        }
    }
}
