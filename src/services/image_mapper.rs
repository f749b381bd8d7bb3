use crate::models::image::{Image, ImageListItem, ImageRecord};

#[must_use]
pub fn to_image(image: ImageRecord) -> Image {
    Image {
        id: image.id,
        name: image.name,
        hyperlink: image.hyperlink,
        description: image.description,
        scripts_using: image.scripts_using,
        reports: image.reports,
        author_id: image.author_id,
    }
}

/// Map records to list entries. An empty input yields `None`.
#[must_use]
pub fn to_images(images: &[ImageRecord]) -> Option<Vec<ImageListItem>> {
    if images.is_empty() {
        return None;
    }

    let items = images
        .iter()
        .map(|image| ImageListItem {
            id: image.id.clone(),
            name: image.name.clone(),
            url_name: url_name(&image.name),
            hyperlink: image.hyperlink.clone(),
            description: image.description.clone(),
            scripts_using: image.scripts_using.clone(),
            reports: image.reports.clone(),
            author_id: image.author_id.clone(),
        })
        .collect();

    Some(items)
}

/// Only the first space and the first slash are replaced.
fn url_name(name: &str) -> String {
    name.replacen(' ', "+", 1).replacen('/', "-", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ImageRecord {
        ImageRecord {
            id: "65a1".to_string(),
            name: name.to_string(),
            hyperlink: "https://hub.example.com/r/base".to_string(),
            description: "base image".to_string(),
            scripts_using: vec!["build.sh".to_string()],
            reports: vec![],
            author_id: "42".to_string(),
        }
    }

    #[test]
    fn empty_input_is_none() {
        assert!(to_images(&[]).is_none());
    }

    #[test]
    fn first_space_becomes_plus() {
        let items = to_images(&[record("A B")]).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url_name, "A+B");
        assert_eq!(items[0].name, "A B");
    }

    #[test]
    fn only_first_occurrences_replaced() {
        assert_eq!(url_name("a b c/d/e"), "a+b c-d/e");
        assert_eq!(url_name("plain"), "plain");
    }

    #[test]
    fn single_view_keeps_fields() {
        let image = to_image(record("ubuntu/base"));
        assert_eq!(image.name, "ubuntu/base");
        assert_eq!(image.scripts_using, vec!["build.sh".to_string()]);

        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["_id"], "65a1");
        assert_eq!(json["authorID"], "42");
        assert_eq!(json["scriptsUsing"][0], "build.sh");
    }

    #[test]
    fn record_deserializes_from_document_keys() {
        let record: ImageRecord = serde_json::from_str(
            r#"{"_id":"1","name":"n","hyperlink":"h","description":"d","authorID":"7"}"#,
        )
        .unwrap();
        assert_eq!(record.author_id, "7");
        assert!(record.scripts_using.is_empty());
    }
}
