//! 把 `cobblemon:is_forest` 這類識別字串轉成可讀的顯示文字

const NAMESPACE_PREFIX: &str = "cobblemon:";

/// 每個以空白分隔的詞首字大寫、其餘小寫；空白原樣保留。
/// 標點不算詞界，`king's` 會成為 `King's`
pub fn title_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut at_word_start = true;

    for ch in input.chars() {
        if ch.is_whitespace() {
            result.push(ch);
            at_word_start = true;
        } else if at_word_start {
            result.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            result.extend(ch.to_lowercase());
        }
    }

    result
}

/// `cobblemon:is_dark_forest` -> `Dark Forest`
pub fn format_biome_tag(tag: &str) -> String {
    let local = tag.rsplit(':').next().unwrap_or(tag);
    title_case(&local.replace("is_", "").replace('_', " "))
}

/// `cobblemon:chesto_berry` -> `Chesto Berry`
pub fn format_identifier(id: &str) -> String {
    let local = id.strip_prefix(NAMESPACE_PREFIX).unwrap_or(id);
    title_case(&local.replace('_', " "))
}

/// `growth` -> `Growth Mulch`
pub fn format_mulch(id: &str) -> String {
    format!("{} Mulch", title_case(&id.replace('_', " ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("cheri berry"), "Cheri Berry");
        assert_eq!(title_case("hOT sPRINGS"), "Hot Springs");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("two  spaces"), "Two  Spaces");
        assert_eq!(title_case("king's leaf"), "King's Leaf");
    }

    #[test]
    fn test_format_biome_tag() {
        assert_eq!(format_biome_tag("cobblemon:is_forest"), "Forest");
        assert_eq!(format_biome_tag("minecraft:is_dark_forest"), "Dark Forest");
        assert_eq!(format_biome_tag("cobblemon:is_sky"), "Sky");
    }

    #[test]
    fn test_format_biome_tag_without_namespace() {
        assert_eq!(format_biome_tag("is_jungle"), "Jungle");
        assert_eq!(format_biome_tag("swamp"), "Swamp");
    }

    #[test]
    fn test_format_biome_tag_uses_last_segment() {
        assert_eq!(format_biome_tag("a:b:is_frozen_ocean"), "Frozen Ocean");
    }

    #[test]
    fn test_format_identifier() {
        assert_eq!(format_identifier("cobblemon:chesto_berry"), "Chesto Berry");
        assert_eq!(format_identifier("persim_berry"), "Persim Berry");
        assert_eq!(format_identifier("ORAN_BERRY"), "Oran Berry");
    }

    #[test]
    fn test_format_mulch() {
        assert_eq!(format_mulch("growth"), "Growth Mulch");
        assert_eq!(format_mulch("rich_soil"), "Rich Soil Mulch");
        assert_eq!(format_mulch("LOAMY"), "Loamy Mulch");
    }
}
