//! Names derived from file and directory names.

/// Convert a file stem to lower camel case: `my-demo` becomes `myDemo`.
pub fn camel_case(input: &str) -> String {
    words(input)
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

/// Convert a component directory name to the key used by the docs router:
/// `date-picker` becomes `DatePicker`.
pub fn component_name(dir_name: &str) -> String {
    words(dir_name).iter().map(|w| capitalize(w)).collect()
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Split on separators, case changes and digit runs: `XMLHttp-request2` gives
/// `["XML", "Http", "request", "2"]`.
fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = if c.is_numeric() != prev.is_numeric() {
                true
            } else {
                c.is_uppercase() && (prev.is_lowercase() || (prev.is_uppercase() && next_is_lower))
            };
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_cases_demo_names() {
        assert_eq!(camel_case("my-demo"), "myDemo");
        assert_eq!(camel_case("basic"), "basic");
        assert_eq!(camel_case("custom_render-item"), "customRenderItem");
        assert_eq!(camel_case("Basic Usage"), "basicUsage");
        assert_eq!(camel_case("fooBar"), "fooBar");
        assert_eq!(camel_case("XMLHttp"), "xmlHttp");
        assert_eq!(camel_case("demo2"), "demo2");
        assert_eq!(camel_case("foo2bar"), "foo2Bar");
        assert_eq!(camel_case("2col-layout"), "2ColLayout");
        assert_eq!(camel_case("--"), "");
    }

    #[test]
    fn splits_digit_runs() {
        assert_eq!(words("XMLHttp-request2"), vec!["XML", "Http", "request", "2"]);
        assert_eq!(words("foo2bar"), vec!["foo", "2", "bar"]);
        assert_eq!(words("v10"), vec!["v", "10"]);
    }

    #[test]
    fn pascal_cases_component_names() {
        assert_eq!(component_name("date-picker"), "DatePicker");
        assert_eq!(component_name("button"), "Button");
        assert_eq!(component_name("time_picker2"), "TimePicker2");
        assert_eq!(component_name("step3d"), "Step3D");
    }
}
