use super::*;
use std::path::PathBuf;

fn pairs(p: &[(&str, &str)]) -> Vec<(String, String)> {
    p.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn build_lowercases_keys() {
    let tags = TagMap::build(pairs(&[("ARTIST", "Foo"), ("Album", "Bar")]));
    assert_eq!(tags.get(TagName::Artist), Some("Foo"));
    assert_eq!(tags.get(TagName::Album), Some("Bar"));
    assert_eq!(tags.get_raw("ALBUM"), Some("Bar"));
    assert_eq!(tags, TagMap::build(pairs(&[("artist", "Foo"), ("album", "Bar")])));
}

#[test]
fn year_only_is_mirrored_into_date() {
    let tags = TagMap::build(pairs(&[("year", "1999")]));
    assert_eq!(tags.get(TagName::Date), Some("1999"));
    assert_eq!(tags.get(TagName::Year), Some("1999"));
}

#[test]
fn date_only_is_mirrored_into_year() {
    let tags = TagMap::build(pairs(&[("DATE", "2004")]));
    assert_eq!(tags.get(TagName::Year), Some("2004"));
}

#[test]
fn conflicting_year_and_date_are_left_alone() {
    let tags = TagMap::build(pairs(&[("year", "1999"), ("date", "2001")]));
    assert_eq!(tags.get(TagName::Year), Some("1999"));
    assert_eq!(tags.get(TagName::Date), Some("2001"));
}

#[test]
fn no_date_fields_means_no_mirroring() {
    let tags = TagMap::build(pairs(&[("genre", "Rock")]));
    assert_eq!(tags.get(TagName::Year), None);
    assert_eq!(tags.get(TagName::Date), None);
    assert_eq!(tags, TagMap::build(pairs(&[("genre", "Rock")])));
}

#[test]
fn comments_key_answers_for_comment() {
    let tags = TagMap::build(pairs(&[("COMMENTS", "ripped")]));
    assert_eq!(tags.get(TagName::Comment), Some("ripped"));
}

#[test]
fn tag_name_parse_accepts_comment_synonym() {
    assert_eq!(TagName::parse("comments"), Some(TagName::Comment));
    assert_eq!(TagName::parse("comment"), Some(TagName::Comment));
    assert_eq!(TagName::parse("title"), None);
    assert!(TagName::Year.is_date_like());
    assert!(!TagName::Genre.is_date_like());
}

fn audio_item(tags: &[(&str, &str)]) -> MediaItem {
    MediaItem::new(
        PathBuf::from("/music/a/track01.flac"),
        PathBuf::from("/out/a/track01.flac"),
        MediaKind::Audio(AudioKind::Flac),
    )
    .with_audio(AudioInfo {
        tags: pairs(tags),
        sample_rate: Some(44_100),
        bit_depth: Some(16),
    })
}

#[test]
fn with_audio_builds_tag_map_and_properties() {
    let item = audio_item(&[("artist", "A")]);
    assert!(item.is_audio());
    assert_eq!(item.sample_rate, Some(44_100));
    assert_eq!(item.bit_depth, Some(16));
    assert_eq!(item.tags.unwrap().get(TagName::Artist), Some("A"));
}

#[test]
fn pretty_prefers_artist_album_title() {
    let full = audio_item(&[("artist", "A"), ("album", "B"), ("title", "C")]);
    assert_eq!(full.pretty(), "A/B/C");

    let partial = audio_item(&[("artist", "A"), ("title", "C")]);
    assert_eq!(partial.pretty(), "A/track01.flac");

    let image = MediaItem::new(
        PathBuf::from("/music/a/cover.jpg"),
        PathBuf::from("/out/a/cover.jpg"),
        MediaKind::Image(ImageKind::Jpeg),
    );
    assert!(!image.is_audio());
    assert_eq!(image.pretty(), "cover.jpg");
}
