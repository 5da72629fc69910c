//! Static bundled catalog. The provider decorates these entries with
//! randomized display fields on every read.

use crate::types::ProductType;

#[derive(Debug, Clone, Copy)]
pub struct SeedProduct {
    pub id: &'static str,
    pub slug: &'static str,
    pub name: &'static str,
    pub category: ProductType,
    pub sub_category: Option<&'static str>,
    pub producer: &'static str,
    pub region: &'static str,
    pub vintage: Option<f64>,
    pub current_market_price_usd: f64,
    pub tasting_notes: Option<&'static str>,
    pub investment_potential: Option<&'static str>,
    pub five_year_price_change_pct: Option<f64>,
    pub critic_score: Option<u8>,
}

const fn wine(
    id: &'static str,
    name: &'static str,
    sub_category: &'static str,
    producer: &'static str,
    region: &'static str,
    vintage: f64,
    price: f64,
) -> SeedProduct {
    SeedProduct {
        id,
        slug: id,
        name,
        category: ProductType::Wine,
        sub_category: Some(sub_category),
        producer,
        region,
        vintage: Some(vintage),
        current_market_price_usd: price,
        tasting_notes: None,
        investment_potential: None,
        five_year_price_change_pct: None,
        critic_score: None,
    }
}

const fn spirit(
    id: &'static str,
    name: &'static str,
    sub_category: &'static str,
    producer: &'static str,
    region: &'static str,
    price: f64,
) -> SeedProduct {
    SeedProduct {
        id,
        slug: id,
        name,
        category: ProductType::Spirits,
        sub_category: Some(sub_category),
        producer,
        region,
        vintage: None,
        current_market_price_usd: price,
        tasting_notes: None,
        investment_potential: None,
        five_year_price_change_pct: None,
        critic_score: None,
    }
}

pub static SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        tasting_notes: Some("Cassis, cedar and graphite with a long, silky finish."),
        investment_potential: Some("Blue-chip Bordeaux with deep secondary market liquidity."),
        five_year_price_change_pct: Some(18.4),
        critic_score: Some(98),
        ..wine(
            "chateau-lafite-rothschild-2010",
            "Château Lafite Rothschild 2010",
            "Cabernet Sauvignon Blend",
            "Château Lafite Rothschild",
            "Pauillac, Bordeaux",
            2010.0,
            1450.0,
        )
    },
    SeedProduct {
        tasting_notes: Some("Brioche, white peach and chalky minerality."),
        five_year_price_change_pct: Some(22.1),
        critic_score: Some(96),
        ..wine(
            "dom-perignon-2013",
            "Dom Pérignon 2013",
            "Champagne Blend",
            "Moët & Chandon",
            "Champagne",
            2013.0,
            285.0,
        )
    },
    SeedProduct {
        tasting_notes: Some("Dried fruit, ginger and sherry oak."),
        investment_potential: Some("Limited annual release with steady auction demand."),
        five_year_price_change_pct: Some(41.7),
        ..spirit(
            "macallan-25-year-old",
            "Macallan 25 Year Old",
            "Single Malt Scotch",
            "The Macallan",
            "Speyside, Scotland",
            2400.0,
        )
    },
    SeedProduct {
        investment_potential: Some("Cult Napa allocation, trades well above release."),
        critic_score: Some(99),
        ..wine(
            "screaming-eagle-2019",
            "Screaming Eagle 2019",
            "Cabernet Sauvignon",
            "Screaming Eagle",
            "Oakville, Napa Valley",
            2019.0,
            4200.0,
        )
    },
    SeedProduct {
        tasting_notes: Some("Candied fruit, jasmine and old rancio."),
        ..spirit(
            "hennessy-paradis",
            "Hennessy Paradis",
            "Cognac",
            "Hennessy",
            "Cognac, France",
            1050.0,
        )
    },
    SeedProduct {
        tasting_notes: Some("Violets, black cherry and fine-grained tannins."),
        five_year_price_change_pct: Some(12.9),
        critic_score: Some(100),
        ..wine(
            "chateau-margaux-2015",
            "Château Margaux 2015",
            "Cabernet Sauvignon Blend",
            "Château Margaux",
            "Margaux, Bordeaux",
            2015.0,
            980.0,
        )
    },
    SeedProduct {
        critic_score: Some(97),
        ..wine(
            "opus-one-2018",
            "Opus One 2018",
            "Bordeaux Blend",
            "Opus One Winery",
            "Oakville, Napa Valley",
            2018.0,
            420.0,
        )
    },
    SeedProduct {
        investment_potential: Some("Baccarat decanter release; strong collector base."),
        five_year_price_change_pct: Some(9.5),
        ..spirit(
            "louis-xiii-cognac",
            "Louis XIII Cognac",
            "Cognac",
            "Rémy Martin",
            "Grande Champagne, Cognac",
            4800.0,
        )
    },
    SeedProduct {
        tasting_notes: Some("Red berries, forest floor and spice."),
        critic_score: Some(99),
        ..wine(
            "domaine-romanee-conti-la-tache-2017",
            "Domaine de la Romanée-Conti La Tâche 2017",
            "Pinot Noir",
            "Domaine de la Romanée-Conti",
            "Vosne-Romanée, Burgundy",
            2017.0,
            4950.0,
        )
    },
    wine(
        "sassicaia-2016",
        "Tenuta San Guido Sassicaia 2016",
        "Cabernet Sauvignon Blend",
        "Tenuta San Guido",
        "Bolgheri, Tuscany",
        2016.0,
        390.0,
    ),
    SeedProduct {
        tasting_notes: Some("Plum, tar and roses."),
        ..wine(
            "giacomo-conterno-monfortino-2013",
            "Giacomo Conterno Barolo Monfortino 2013",
            "Nebbiolo",
            "Giacomo Conterno",
            "Barolo, Piedmont",
            2013.0,
            1650.0,
        )
    },
    wine(
        "penfolds-grange-2017",
        "Penfolds Grange 2017",
        "Shiraz",
        "Penfolds",
        "South Australia",
        2017.0,
        720.0,
    ),
    SeedProduct {
        five_year_price_change_pct: Some(-4.2),
        ..wine(
            "cloudy-bay-sauvignon-blanc-2022",
            "Cloudy Bay Sauvignon Blanc 2022",
            "Sauvignon Blanc",
            "Cloudy Bay",
            "Marlborough, New Zealand",
            2022.0,
            32.0,
        )
    },
    SeedProduct {
        tasting_notes: Some("Honeyed apricot, saffron and marmalade."),
        critic_score: Some(97),
        ..wine(
            "chateau-d-yquem-2009",
            "Château d'Yquem 2009",
            "Sémillon Blend",
            "Château d'Yquem",
            "Sauternes, Bordeaux",
            2009.0,
            610.0,
        )
    },
    spirit(
        "pappy-van-winkle-23",
        "Pappy Van Winkle's Family Reserve 23 Year",
        "Bourbon",
        "Old Rip Van Winkle",
        "Kentucky, USA",
        3900.0,
    ),
    SeedProduct {
        tasting_notes: Some("Incense, sandalwood and dark chocolate."),
        ..spirit(
            "yamazaki-18",
            "Yamazaki 18 Year Old",
            "Japanese Single Malt",
            "Suntory",
            "Osaka, Japan",
            890.0,
        )
    },
    spirit(
        "clase-azul-ultra",
        "Clase Azul Ultra",
        "Extra Añejo Tequila",
        "Clase Azul",
        "Jalisco, Mexico",
        1800.0,
    ),
    spirit(
        "lagavulin-16",
        "Lagavulin 16 Year Old",
        "Islay Single Malt",
        "Lagavulin",
        "Islay, Scotland",
        95.0,
    ),
    SeedProduct {
        critic_score: Some(95),
        ..wine(
            "vega-sicilia-unico-2011",
            "Vega Sicilia Único 2011",
            "Tempranillo Blend",
            "Vega Sicilia",
            "Ribera del Duero, Spain",
            2011.0,
            520.0,
        )
    },
    spirit(
        "diplomatico-ambassador",
        "Diplomático Ambassador",
        "Aged Rum",
        "Destilerías Unidas",
        "Venezuela",
        310.0,
    ),
    // Beyond the featured slice; never exposed by the provider.
    wine(
        "krug-clos-d-ambonnay-2002",
        "Krug Clos d'Ambonnay 2002",
        "Pinot Noir",
        "Krug",
        "Champagne",
        2002.0,
        3600.0,
    ),
    spirit(
        "bowmore-black-50",
        "Bowmore Black 50 Year Old",
        "Islay Single Malt",
        "Bowmore",
        "Islay, Scotland",
        4700.0,
    ),
];
