//! Full detail for one Pokemon: artwork, stats, evolution line, megas and alternate forms.

use super::pokeapi::{ApiEvolutionChain, ApiPokemon, ApiSpecies, EvolutionNode, SpritePolicy};
use super::PokemonGateway;
use crate::errors::GatewayResult;
use futures::future::join_all;
use schema::{FormName, FormVariant, MegaEvolution, PokemonDetail};

const MEGA_SUFFIXES: [&str; 3] = ["mega", "mega-x", "mega-y"];

impl PokemonGateway {
    pub async fn pokemon_detail(&self, id_or_name: &str) -> GatewayResult<PokemonDetail> {
        let key = id_or_name.trim().to_lowercase();
        let pokemon: ApiPokemon = self
            .fetch_json(&self.pokeapi_url(&format!("pokemon/{}", key)))
            .await?;
        let species: ApiSpecies = self.fetch_json(&pokemon.species.url).await?;

        let evolutions = match &species.evolution_chain {
            Some(chain) => self.evolution_tree(&chain.url).await?.primary_path(),
            None => Vec::new(),
        };
        let mega_evolutions = self.probe_megas(&species.name).await;

        let policy = if FormName::parse(&pokemon.name).tag.is_mega() {
            SpritePolicy::MegaForm
        } else {
            SpritePolicy::HighestFidelity
        };

        let forms = species
            .varieties
            .iter()
            .map(|variety| FormVariant {
                name: variety.pokemon.name.clone(),
                label: FormName::for_species(&species.name, &variety.pokemon.name).label(),
                is_default: variety.is_default,
            })
            .collect();

        let summary = pokemon.to_summary()?;
        Ok(PokemonDetail {
            id: summary.id,
            name: summary.name,
            sprite: summary.sprite,
            normal_artwork: pokemon.sprites.select(pokemon.id, false, policy),
            shiny_artwork: pokemon.sprites.select(pokemon.id, true, policy),
            types: summary.types,
            base_stats: pokemon.base_stats(),
            evolutions,
            mega_evolutions,
            forms,
        })
    }

    /// The whole evolution family the chain resource describes.
    pub async fn evolution_tree(&self, chain_url: &str) -> GatewayResult<EvolutionNode> {
        let chain: ApiEvolutionChain = self.fetch_json(chain_url).await?;
        EvolutionNode::from_link(&chain.chain)
    }

    /// Try every mega suffix for `base`. A candidate that cannot be fetched does not exist.
    pub async fn probe_megas(&self, base: &str) -> Vec<MegaEvolution> {
        let probes = MEGA_SUFFIXES.iter().map(|suffix| async move {
            let name = format!("{}-{}", base, suffix);
            let url = self.pokeapi_url(&format!("pokemon/{}", name));
            match self.fetch_json::<ApiPokemon>(&url).await {
                Ok(pokemon) => Some(pokemon),
                Err(err) => {
                    log::debug!("no {}: {}", name, err);
                    None
                }
            }
        });

        join_all(probes)
            .await
            .into_iter()
            .flatten()
            .filter_map(|pokemon| match pokemon.to_mega() {
                Ok(mega) => Some(mega),
                Err(err) => {
                    log::warn!("skipping {}: {}", pokemon.name, err);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::transport::CannedTransport;
    use crate::errors::GatewayError;
    use pretty_assertions::assert_eq;
    use schema::PokemonType;
    use serde_json::{json, Value};

    fn chain_url() -> String {
        format!("{}/evolution-chain/2/", API)
    }

    fn charmander_line() -> Value {
        let link = |id: u32, name: &str, next: Vec<Value>| {
            json!({"species": {"name": name, "url": species_url(id)}, "evolves_to": next})
        };
        json!({
            "chain": link(4, "charmander", vec![link(5, "charmeleon", vec![link(6, "charizard", vec![])])])
        })
    }

    fn charizard_species() -> Value {
        json!({
            "id": 6,
            "name": "charizard",
            "evolution_chain": {"url": chain_url()},
            "varieties": [
                {"is_default": true, "pokemon": {"name": "charizard", "url": format!("{}/pokemon/6/", API)}},
                {"is_default": false, "pokemon": {"name": "charizard-mega-x", "url": format!("{}/pokemon/10034/", API)}},
                {"is_default": false, "pokemon": {"name": "charizard-mega-y", "url": format!("{}/pokemon/10035/", API)}}
            ]
        })
    }

    fn charizard_transport() -> CannedTransport {
        CannedTransport::new()
            .with_json(pokemon_url(6), pokemon_body(6, "charizard", 6, &["fire", "flying"]))
            .with_json(species_url(6), charizard_species())
            .with_json(chain_url(), charmander_line())
            .with_json(
                pokemon_url("charizard-mega-x"),
                pokemon_body(10034, "charizard-mega-x", 6, &["fire", "dragon"]),
            )
            .with_json(
                pokemon_url("charizard-mega-y"),
                pokemon_body(10035, "charizard-mega-y", 6, &["fire", "flying"]),
            )
    }

    #[tokio::test]
    async fn test_detail_collects_every_section() {
        let h = harness(charizard_transport());
        let detail = h.gateway.pokemon_detail("6").await.unwrap();

        assert_eq!(detail.types, vec![PokemonType::Fire, PokemonType::Flying]);
        assert_eq!(detail.normal_artwork, "https://art.test/6.png");
        assert_eq!(detail.shiny_artwork, "https://art.test/shiny/6.png");
        assert_eq!(detail.base_stats.attack, 60);

        let line: Vec<&str> = detail.evolutions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(line, vec!["charmander", "charmeleon", "charizard"]);

        let megas: Vec<(&str, &str)> = detail
            .mega_evolutions
            .iter()
            .map(|m| (m.name.as_str(), m.image.as_str()))
            .collect();
        assert_eq!(
            megas,
            vec![
                ("charizard-mega-x", "https://home.test/10034.png"),
                ("charizard-mega-y", "https://home.test/10035.png"),
            ]
        );

        let labels: Vec<&str> = detail.forms.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["Charizard", "Mega Charizard X", "Mega Charizard Y"]);
    }

    #[tokio::test]
    async fn test_missing_megas_are_silent() {
        let h = harness(CannedTransport::new());
        assert!(h.gateway.probe_megas("pikachu").await.is_empty());
        assert_eq!(h.transport.total_requests(), 3);
    }

    #[tokio::test]
    async fn test_mega_detail_prefers_home_artwork() {
        let h = harness(charizard_transport());
        let detail = h.gateway.pokemon_detail("charizard-mega-x").await.unwrap();
        assert_eq!(detail.normal_artwork, "https://home.test/10034.png");
        assert_eq!(detail.shiny_artwork, "https://home.test/shiny/10034.png");
    }

    #[tokio::test]
    async fn test_missing_species_fails_the_detail() {
        let h = harness(
            CannedTransport::new()
                .with_json(pokemon_url(6), pokemon_body(6, "charizard", 6, &["fire", "flying"])),
        );
        let result = h.gateway.pokemon_detail("6").await;
        assert!(matches!(result, Err(GatewayError::Transport(_))));
    }
}
